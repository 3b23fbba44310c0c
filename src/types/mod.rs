pub mod audio_source;
pub mod flame;
pub mod playback_state;
pub mod session;
