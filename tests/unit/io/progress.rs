//! Tests for progress display lifecycle

#[cfg(test)]
mod tests {
    use drumvary::io::progress::ProgressManager;
    use std::path::Path;

    // A single file goes through the full lifecycle without a batch bar
    #[test]
    fn test_single_file_lifecycle() {
        let mut progress = ProgressManager::new();
        progress.initialize(1);
        progress.start_file(Path::new("drumPattern.txt"), 64);
        for bar in 1..=64 {
            progress.update_bar(bar);
        }
        progress.complete_file();
        progress.finish();
    }

    // Large batches replace a finished file bar with the next one
    #[test]
    fn test_batch_lifecycle() {
        let mut progress = ProgressManager::default();
        progress.initialize(8);
        for index in 0..8 {
            let name = format!("seed_{index}.txt");
            progress.start_file(Path::new(&name), 4);
            progress.update_bar(2);
            if index % 2 == 0 {
                progress.complete_file();
            }
        }
        progress.finish();
    }

    // Updates without an active file are ignored
    #[test]
    fn test_update_without_file() {
        let mut progress = ProgressManager::new();
        progress.update_bar(3);
        progress.complete_file();
        progress.finish();
    }
}
