//! SQLite helpers.

/// Chunk size for batched inserts.
///
/// SQLite caps the number of bound parameters per statement
/// (SQLITE_MAX_VARIABLE_NUMBER, typically 999 on older builds). 100 rows of
/// 7 columns stays well under that cap on every build we target.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 100;

/// Split a slice into chunks sized for batched SQLite statements.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_for_sqlite_empty() {
        let items: Vec<i32> = vec![];
        assert!(chunk_for_sqlite(&items).next().is_none());
    }

    #[test]
    fn test_chunk_for_sqlite_over_limit() {
        let items: Vec<i32> = (0..250).collect();
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[2].len(), 50);
    }
}
