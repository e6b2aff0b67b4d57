use log::debug;
use nalgebra::{Point3, Unit, Vector3};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::tracer::intersect::HitPayload;
use crate::tracer::ray::Ray;
use crate::tracer::scene::{Material, Scene};
use crate::tracer::texture::{EnvironmentMap, Framebuffer};
use crate::util::{fresnel, normalize_or_zero, reflect, refract};
use crate::Color;

pub mod intersect;
pub mod ray;
pub mod scene;
pub mod texture;

#[derive(Debug, Clone)]
pub struct Settings {
    /// 이 깊이를 넘으면 더 이상 튕기지 않고 배경색을 돌려줌
    pub max_depth: u32,
    /// 2차 광선 원점을 표면에서 띄우는 거리
    pub epsilon: f32,
    /// 모든 표면에 똑같이 더해지는 주변광 세기. 0이면 주변광 없음.
    pub ambient_intensity: f32,
    /// 줄 단위로 rayon 병렬 처리. 꺼도 결과는 같음.
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: 4,
            epsilon: 1e-3,
            ambient_intensity: 0.0,
            parallel: true,
        }
    }
}

/// 한 점에서 모든 광원으로부터 받은 빛의 세기 합
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Illumination {
    pub diffuse: f32,
    pub specular: f32,
}

/// 휘티드 방식 재귀 광선 추적기. 장면과 환경 맵은 렌더링 동안 읽기만 함.
pub struct Tracer<'a> {
    pub settings: Settings,
    scene: &'a Scene,
    environment: &'a EnvironmentMap,
}

impl<'a> Tracer<'a> {
    pub fn new(settings: Settings, scene: &'a Scene, environment: &'a EnvironmentMap) -> Self {
        Self {
            settings,
            scene,
            environment,
        }
    }

    pub fn render(&self, camera: &Camera) -> Framebuffer {
        let (width, height) = (camera.width(), camera.height());
        let mut framebuffer = Framebuffer::new(width, height);
        if width == 0 || height == 0 {
            return framebuffer;
        }
        debug!("{width}x{height} 렌더링 시작, 병렬 처리: {}", self.settings.parallel);

        // 픽셀끼리는 서로 의존하지 않으니 줄 단위로 나눠서 처리해도 결과가 같음
        let pixels = framebuffer.pixels_mut();
        if self.settings.parallel {
            pixels
                .par_chunks_exact_mut(width)
                .enumerate()
                .for_each(|(y, row)| self.fill_row(camera, y, row));
        } else {
            pixels
                .chunks_exact_mut(width)
                .enumerate()
                .for_each(|(y, row)| self.fill_row(camera, y, row));
        }

        framebuffer
    }

    fn fill_row(&self, camera: &Camera, y: usize, row: &mut [[u8; 3]]) {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = Framebuffer::quantize(&self.per_pixel(camera, x, y));
        }
    }

    pub fn per_pixel(&self, camera: &Camera, x: usize, y: usize) -> Color {
        self.cast_ray(&camera.ray(x, y), 0)
    }

    pub fn cast_ray(&self, ray: &Ray, depth: u32) -> Color {
        if depth > self.settings.max_depth {
            return self.environment.sample(&ray.direction);
        }
        let Some(hit) = self.scene.intersect(ray) else {
            return self.environment.sample(&ray.direction);
        };

        let HitPayload {
            position,
            normal,
            material,
            ..
        } = hit;
        let incident = ray.direction.into_inner();

        let light = self.illuminate(&position, &normal, &material, &ray.direction);
        let diffuse = material.color * material.diffuse * light.diffuse;
        let specular = material.color * material.specular * light.specular;
        let ambient = material.color * material.ambient * self.settings.ambient_intensity;

        let reflected = if material.reflectivity > 0.0 {
            let direction = Unit::new_unchecked(normalize_or_zero(&reflect(&incident, &normal)));
            let reflect_ray = Ray::offset(position, &normal, direction, self.settings.epsilon);
            self.cast_ray(&reflect_ray, depth + 1) * material.reflectivity
        } else {
            Vector3::zeros()
        };

        // 전반사면 굴절광은 없음
        let refracted = if material.refractivity > 0.0 {
            refract(&incident, &normal, material.ior)
                .map(|direction| {
                    let refract_ray = Ray::offset(position, &normal, direction, self.settings.epsilon);
                    self.cast_ray(&refract_ray, depth + 1) * material.refractivity
                })
                .unwrap_or_else(Vector3::zeros)
        } else {
            Vector3::zeros()
        };

        // 둘 다 있을 때만 프레넬 항으로 섞음. 아니면 반사광을 그대로 씀.
        let kr = if material.reflectivity > 0.0 && material.refractivity > 0.0 {
            fresnel(&incident, &normal, material.ior)
        } else {
            1.0
        };

        diffuse + specular + ambient + reflected * kr + refracted * (1.0 - kr)
    }

    /// 광원마다 그림자 광선을 쏴서 가려지지 않은 광원의 확산광과 반사광 세기를 더함.
    ///
    /// 거리에 따른 감쇠는 없음. 광원까지의 거리는 가려졌는지 판단할 때만 씀.
    pub fn illuminate(
        &self,
        position: &Point3<f32>,
        normal: &Unit<Vector3<f32>>,
        material: &Material,
        incoming: &Unit<Vector3<f32>>,
    ) -> Illumination {
        let mut illumination = Illumination::default();

        for light in &self.scene.lights {
            let to_light = light.position - position;
            let light_distance = to_light.norm();
            let Some(to_light) = Unit::try_new(to_light, f32::EPSILON) else {
                // 광원이 표면 위에 딱 붙어 있음
                continue;
            };

            let shadow_ray = Ray::offset(*position, normal, to_light, self.settings.epsilon);
            let occluded = self
                .scene
                .intersect(&shadow_ray)
                .is_some_and(|blocker| blocker.distance < light_distance);
            if occluded {
                continue;
            }

            illumination.diffuse += light.intensity * to_light.dot(normal.as_ref()).max(0.0);

            // 블린-퐁 하프 벡터
            let half_way = normalize_or_zero(&(to_light.into_inner() - incoming.into_inner()));
            illumination.specular +=
                light.intensity * normal.dot(&half_way).max(0.0).powf(material.shininess);
        }

        illumination
    }
}
