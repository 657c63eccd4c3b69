pub mod client;
pub mod cooldown;
pub mod emitter;
pub mod relay;

#[cfg(test)]
pub mod testing;
