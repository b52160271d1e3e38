//! Integration tests driving the sora-release binary

mod helpers;
mod test_canary;
mod test_libwebrtc;
