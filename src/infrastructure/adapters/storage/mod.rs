//! Storage Adapter - 请求级临时文件

mod temp_audio;

pub use temp_audio::{TempAudioFile, TempAudioStream};
