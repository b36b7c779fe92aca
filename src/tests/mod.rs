// This file links the test modules.

// Files produced by the encoder, checked with an independent decoder
#[cfg(test)]
mod general;
