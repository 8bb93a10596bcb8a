//! WAV 封装
//!
//! TTS 服务返回 `audio/L16;codec=pcm;rate=24000` 这类裸 PCM，
//! 需要补上 44 字节的 RIFF/WAV 头才能直接播放

use thiserror::Error;

/// WAV 头长度
pub const WAV_HEADER_LEN: usize = 44;

const DEFAULT_BITS_PER_SAMPLE: u16 = 16;
const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// WAV 封装错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WavError {
    #[error("unsupported PCM format: {bits_per_sample} bit, {sample_rate} Hz, {channels} channel(s)")]
    UnsupportedFormat {
        bits_per_sample: u16,
        sample_rate: u32,
        channels: u16,
    },

    #[error("PCM data too large for WAV: {0} bytes")]
    DataTooLarge(usize),
}

/// 裸 PCM 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub bits_per_sample: u16,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: 1,
        }
    }
}

impl PcmFormat {
    /// 从 MIME 类型解析位深和采样率
    ///
    /// 位深取自 `audio/L<bits>`，采样率取自 `rate=<hz>`；
    /// 缺失或无法解析的参数保持默认值（16 bit / 24000 Hz，单声道）
    pub fn from_mime(mime_type: &str) -> Self {
        let mut format = Self::default();

        for param in mime_type.split(';').map(str::trim) {
            if let Some(rate) = strip_prefix_ignore_case(param, "rate=") {
                if let Ok(rate) = rate.trim().parse() {
                    format.sample_rate = rate;
                }
            } else if let Some(bits) = param.strip_prefix("audio/L") {
                if let Ok(bits) = bits.parse() {
                    format.bits_per_sample = bits;
                }
            }
        }

        format
    }

    fn unsupported(&self) -> WavError {
        WavError::UnsupportedFormat {
            bits_per_sample: self.bits_per_sample,
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// 每帧字节数；位深不足 8 bit 或溢出时返回 None
    fn block_align(&self) -> Option<u16> {
        match self.channels.checked_mul(self.bits_per_sample / 8)? {
            0 => None,
            align => Some(align),
        }
    }

    fn byte_rate(&self) -> Option<u32> {
        if self.sample_rate == 0 {
            return None;
        }
        self.sample_rate.checked_mul(u32::from(self.block_align()?))
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}

/// 是否为已经带容器的 WAV
pub fn is_wav_mime(mime_type: &str) -> bool {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    ["audio/wav", "audio/x-wav", "audio/wave", "audio/vnd.wave"]
        .iter()
        .any(|wav| essence.eq_ignore_ascii_case(wav))
}

/// 是否为可以封装成 WAV 的裸 PCM
pub fn is_pcm_mime(mime_type: &str) -> bool {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    essence.starts_with("audio/L") || essence.eq_ignore_ascii_case("audio/pcm")
}

/// 给裸 PCM 数据加上 WAV 头
///
/// 头部字段放不进 RIFF 的定长整数时返回错误
pub fn pcm_to_wav(pcm: &[u8], format: &PcmFormat) -> Result<Vec<u8>, WavError> {
    let block_align = format.block_align().ok_or_else(|| format.unsupported())?;
    let byte_rate = format.byte_rate().ok_or_else(|| format.unsupported())?;
    let data_size = u32::try_from(pcm.len())
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or(WavError::DataTooLarge(pcm.len()))?;
    let chunk_size = 36 + data_size;

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&chunk_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);

    Ok(wav)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(data: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([data[offset], data[offset + 1]])
    }

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    #[test]
    fn test_parse_gemini_mime() {
        let format = PcmFormat::from_mime("audio/L16;codec=pcm;rate=24000");
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_rate, 24000);
        assert_eq!(format.channels, 1);

        let format = PcmFormat::from_mime("audio/L24; Rate=16000");
        assert_eq!(format.bits_per_sample, 24);
        assert_eq!(format.sample_rate, 16000);
    }

    #[test]
    fn test_parse_mime_falls_back_to_defaults() {
        assert_eq!(PcmFormat::from_mime("audio/pcm"), PcmFormat::default());
        assert_eq!(
            PcmFormat::from_mime("audio/Lxx;rate="),
            PcmFormat::default()
        );
        assert_eq!(
            PcmFormat::from_mime("audio/L8;rate=abc").sample_rate,
            24000
        );
    }

    #[test]
    fn test_mime_classification() {
        assert!(is_wav_mime("audio/wav"));
        assert!(is_wav_mime("audio/x-wav; charset=binary"));
        assert!(!is_wav_mime("audio/L16;rate=24000"));
        assert!(is_pcm_mime("audio/L16;codec=pcm;rate=24000"));
        assert!(!is_pcm_mime("audio/mpeg"));
    }

    #[test]
    fn test_wav_header_fields() {
        let pcm = vec![0u8; 4800];
        let format = PcmFormat::from_mime("audio/L16;codec=pcm;rate=24000");
        let wav = pcm_to_wav(&pcm, &format).unwrap();

        assert_eq!(wav.len(), WAV_HEADER_LEN + pcm.len());
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 4800);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1);
        assert_eq!(u32_at(&wav, 24), 24000);
        assert_eq!(u32_at(&wav, 28), 48000);
        assert_eq!(u16_at(&wav, 32), 2);
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 4800);
    }

    #[test]
    fn test_out_of_range_rate_is_rejected() {
        let format = PcmFormat::from_mime("audio/L16;rate=4000000000");
        assert_eq!(format.sample_rate, 4_000_000_000);

        let err = pcm_to_wav(&[0, 0], &format).unwrap_err();
        assert!(matches!(err, WavError::UnsupportedFormat { sample_rate: 4_000_000_000, .. }));
    }

    #[test]
    fn test_degenerate_formats_are_rejected() {
        for mime in ["audio/L4;rate=24000", "audio/L0", "audio/L16;rate=0"] {
            let format = PcmFormat::from_mime(mime);
            assert!(pcm_to_wav(&[0, 0], &format).is_err(), "mime: {mime}");
        }

        let wide = PcmFormat {
            bits_per_sample: 65528,
            sample_rate: 24000,
            channels: 16,
        };
        assert!(pcm_to_wav(&[0, 0], &wide).is_err());
    }
}
