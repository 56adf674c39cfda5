/// A single transformation step over a sequence of elements.
///
/// `T` is the element domain: `char` for text pipelines, `u8` for byte
/// pipelines. Stages are immutable after construction and keep no per-call
/// state, so one stage (or a whole composed chain) can be applied from
/// several threads at once.
pub trait Stage<T>: Send + Sync {
    /// Transform the input into a new owned sequence.
    ///
    /// Total for every well-constructed stage: any input length, including
    /// empty, produces an output. All construction problems are rejected
    /// before a stage exists.
    fn apply(&self, input: &[T]) -> Vec<T>;
}

/// A fully composed pipeline.
///
/// Owns the outermost stage and remembers how many stages were composed
/// into it. A chain is itself a stage, so chains nest.
pub struct Chain<T> {
    root: Box<dyn Stage<T>>,
    stages: usize,
}

impl<T> Chain<T> {
    pub(crate) fn new(root: Box<dyn Stage<T>>, stages: usize) -> Self {
        Chain { root, stages }
    }

    /// Number of stages composed into this chain.
    pub fn stages(&self) -> usize {
        self.stages
    }

    /// Run the whole chain over the input.
    pub fn apply(&self, input: &[T]) -> Vec<T> {
        self.root.apply(input)
    }
}

impl Chain<char> {
    /// Convenience for text pipelines: apply over the characters of a str.
    pub fn apply_str(&self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        self.apply(&chars).into_iter().collect()
    }
}

impl<T> Stage<T> for Chain<T> {
    fn apply(&self, input: &[T]) -> Vec<T> {
        self.root.apply(input)
    }
}

impl<T> std::fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("stages", &self.stages).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Stage<char> for Upper {
        fn apply(&self, input: &[char]) -> Vec<char> {
            input.iter().map(|c| c.to_ascii_uppercase()).collect()
        }
    }

    #[test]
    fn test_chain_delegates_to_root() {
        let chain = Chain::new(Box::new(Upper), 1);
        assert_eq!(chain.apply(&['a', 'b']), vec!['A', 'B']);
        assert_eq!(chain.stages(), 1);
    }

    #[test]
    fn test_apply_str() {
        let chain = Chain::new(Box::new(Upper), 1);
        assert_eq!(chain.apply_str("hei"), "HEI");
    }

    #[test]
    fn test_chain_is_a_stage() {
        let inner = Chain::new(Box::new(Upper), 1);
        let outer = Chain::new(Box::new(inner), 2);
        assert_eq!(outer.apply_str("x"), "X");
        assert_eq!(outer.stages(), 2);
    }

    #[test]
    fn test_chain_shared_across_threads() {
        let chain = std::sync::Arc::new(Chain::new(Box::new(Upper), 1));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let chain = chain.clone();
            handles.push(std::thread::spawn(move || chain.apply_str("abc")));
        }
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "ABC");
        }
    }

    #[test]
    fn test_empty_input() {
        let chain = Chain::new(Box::new(Upper), 1);
        assert!(chain.apply(&[]).is_empty());
    }
}
