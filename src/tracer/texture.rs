use std::f32::consts::PI;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bytemuck::cast_slice;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageError, ImageFormat};
use log::info;
use nalgebra::{Unit, Vector3};

use crate::error::RenderError;
use crate::Color;

/// 등장방형(equirectangular) 파노라마. 광선이 아무것도 맞추지 못하면 여기서 배경색을 가져옴.
pub struct EnvironmentMap {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl EnvironmentMap {
    /// `pixels`는 행 우선 순서. 비어 있거나 크기가 안 맞으면 오류.
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(pixels.len()) {
            return Err(RenderError::EnvironmentSize {
                width,
                height,
                pixels: pixels.len(),
            });
        }

        Ok(Self { width, height, pixels })
    }

    /// 어느 방향에서 봐도 같은 색
    pub fn uniform(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let load_error = |source: ImageError| RenderError::EnvironmentLoad {
            path: path.to_path_buf(),
            source,
        };

        let format = ImageFormat::from_path(path).map_err(load_error)?;
        let reader = BufReader::new(File::open(path).map_err(|e| load_error(e.into()))?);
        let loaded = image::load(reader, format).map_err(load_error)?;

        let channels = loaded.color().channel_count();
        if channels != 3 {
            return Err(RenderError::ChannelCount {
                path: path.to_path_buf(),
                channels,
            });
        }

        let rgb = loaded.into_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        let pixels = rgb
            .pixels()
            .map(|pixel| Vector3::new(pixel[0] as f32, pixel[1] as f32, pixel[2] as f32) / 255.0)
            .collect();

        info!("환경 맵 불러옴: {} ({width}x{height})", path.display());
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// 방향만 보고 가장 가까운 픽셀 색을 돌려줌. 보간은 하지 않음.
    pub fn sample(&self, direction: &Unit<Vector3<f32>>) -> Color {
        // theta: y축과의 각도, phi: x축에서 반시계 방향 각도
        let theta = direction.y.clamp(-1.0, 1.0).acos();
        let phi = direction.z.atan2(direction.x);

        let u = ((phi + PI) / (2.0 * PI) * self.width as f32) as usize;
        let v = (theta / PI * self.height as f32) as usize;

        let u = u.min(self.width - 1);
        let v = v.min(self.height - 1);

        self.pixels[u + v * self.width]
    }
}

/// 최종 결과물. 픽셀마다 한 번씩만 써지고, 이미지 파일로 저장된 뒤 버려짐.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[x + y * self.width]
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.pixels)
    }

    /// [0, 1]로 자른 뒤 255를 곱하고 버림
    pub fn quantize(color: &Color) -> [u8; 3] {
        color.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8).into()
    }

    /// 확장자에 따라 jpg(품질 100), png, bmp로 저장
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        let save_error = |source: ImageError| RenderError::Save {
            path: path.to_path_buf(),
            source,
        };

        let (width, height) = (self.width as u32, self.height as u32);
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => {
                let file = File::create(path).map_err(|e| save_error(e.into()))?;
                let mut writer = BufWriter::new(file);
                JpegEncoder::new_with_quality(&mut writer, 100)
                    .encode(self.as_bytes(), width, height, ColorType::Rgb8)
                    .map_err(save_error)?;
                writer.flush().map_err(|e| save_error(e.into()))
            }
            Ok(format @ (ImageFormat::Png | ImageFormat::Bmp)) => {
                image::save_buffer_with_format(path, self.as_bytes(), width, height, ColorType::Rgb8, format)
                    .map_err(save_error)
            }
            _ => Err(RenderError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
