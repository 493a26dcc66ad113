// Audio module - waveform representation and WAV file I/O

mod io;
mod waveform;

pub use io::{read_wav, write_wav};
pub use waveform::Waveform;
