//! Tests for loading seed pattern files

#[cfg(test)]
mod tests {
    use drumvary::VariationError;
    use drumvary::io::error::ErrorCategory;
    use drumvary::io::seed::load_seed;
    use std::fs;

    // Spaced and labelled rows load into a matrix
    #[test]
    fn test_load_seed_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("temp dir"));
        let path = dir.path().join("seed.txt");
        fs::write(&path, "kick  1000 1000\nsnare 0010 0010\n\nhat   1111 1111\n")
            .unwrap_or_else(|_| unreachable!("write seed"));

        let Ok(seed) = load_seed(&path) else {
            unreachable!("valid seed");
        };

        assert_eq!(seed.voices(), 3);
        assert_eq!(seed.bar_len(), 8);
        assert_eq!(seed.hit_count(), 12);
        assert!(seed.hits(1, 2));
        assert!(!seed.hits(1, 3));
    }

    // Unreadable files report the path
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("temp dir"));
        let path = dir.path().join("absent.txt");

        match load_seed(&path) {
            Err(error @ VariationError::SeedLoad { .. }) => {
                assert_eq!(error.category(), ErrorCategory::Io);
                assert!(error.to_string().contains("absent.txt"));
            }
            _ => unreachable!("Expected SeedLoad error type"),
        }
    }

    // Files without hits or with ragged rows are rejected
    #[test]
    fn test_load_invalid_content() {
        let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("temp dir"));

        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "no pattern here\n").unwrap_or_else(|_| unreachable!("write"));
        assert!(matches!(
            load_seed(&empty),
            Err(VariationError::InvalidSeed { .. })
        ));

        let ragged = dir.path().join("ragged.txt");
        fs::write(&ragged, "1010\n10\n").unwrap_or_else(|_| unreachable!("write"));
        let Err(error) = load_seed(&ragged) else {
            unreachable!("ragged seed");
        };
        assert_eq!(error.category(), ErrorCategory::Configuration);
    }
}
