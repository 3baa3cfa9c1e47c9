/// Words are whitespace-separated runs; characters count everything, spaces included.
pub fn count_words(text: &str) -> (usize, usize) {
    (text.split_whitespace().count(), text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("hello world"), (2, 11));
        assert_eq!(count_words("  spaced   out  "), (2, 16));
        assert_eq!(count_words(""), (0, 0));
        assert_eq!(count_words("naïve café"), (2, 10));
    }
}
