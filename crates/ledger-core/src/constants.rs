pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
/// Previous hash of the first real block: the genesis sentinel has no digest.
pub const GENESIS_PREVIOUS_HASH: &str = "";
