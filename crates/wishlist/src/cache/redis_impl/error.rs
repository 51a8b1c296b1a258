use wishlist_core::cache::CacheError;

/// Network-level failures become `ConnectionFailed` so `/health` reports the
/// cache as unreachable; anything else is an `OperationFailed`.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    let unreachable =
        err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout();

    if unreachable {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}
