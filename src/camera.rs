use nalgebra::{Point3, Unit, Vector3};

use crate::tracer::ray::Ray;

/// 원점에 놓인 핀홀 카메라. -z 방향을 바라봄.
///
/// 참고: https://www.scratchapixel.com/lessons/3d-basic-rendering/ray-tracing-generating-camera-rays/generating-camera-rays.html
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    vertical_fov: f32,
    width: usize,
    height: usize,
    /// tan(fov / 2), 화면까지의 거리가 1일 때 화면 절반의 높이
    screen_half_height: f32,
    aspect: f32,
}

impl Camera {
    /// `vertical_fov`는 라디안
    pub fn new(vertical_fov: f32, width: usize, height: usize) -> Self {
        Self {
            position: Point3::origin(),
            vertical_fov,
            width,
            height,
            screen_half_height: (vertical_fov / 2.0).tan(),
            aspect: width as f32 / height as f32,
        }
    }

    pub fn vertical_fov(&self) -> f32 {
        self.vertical_fov
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// 픽셀 중심을 지나는 방향. 0번째 줄이 화면 맨 위.
    pub fn direction(&self, x: usize, y: usize) -> Unit<Vector3<f32>> {
        let ndc_x = 2.0 * (x as f32 + 0.5) / self.width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * (y as f32 + 0.5) / self.height as f32;

        Unit::new_normalize(Vector3::new(
            ndc_x * self.screen_half_height * self.aspect,
            ndc_y * self.screen_half_height,
            -1.0,
        ))
    }

    pub fn ray(&self, x: usize, y: usize) -> Ray {
        Ray::new(self.position, self.direction(x, y))
    }
}
