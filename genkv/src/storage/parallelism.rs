const MIN_SHARDS: usize = 2;
const MAX_PARALLELISM: usize = 192;

/// Shard count for `parallelism` threads: `parallelism² / 4` rounded down
/// to a power of two, at least [`MIN_SHARDS`]. Sizes both the engine's map
/// shards and the store's lock stripes.
pub fn get_number_of_shards(parallelism: usize) -> usize {
    let parallelism = parallelism.min(MAX_PARALLELISM);
    let wanted = (parallelism * parallelism / 4).max(MIN_SHARDS);
    let shards = 1usize << wanted.ilog2();
    debug!("Parallelism {} gives {} shards", parallelism, shards);
    shards
}

pub fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, usize::from)
}
