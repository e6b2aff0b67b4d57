use std::mem::swap;

use nalgebra::{Unit, Vector3};

/// 길이가 0에 가까운 벡터는 NaN 대신 영벡터로 돌려줌
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    Unit::try_new(*v, f32::EPSILON)
        .map(Unit::into_inner)
        .unwrap_or_else(Vector3::zeros)
}

// R = I - 2(I·N)N
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

/// 스넬의 법칙. 바깥 매질은 진공(굴절률 1)이라고 가정함.
///
/// `incident · normal > 0`이면 물체 안쪽에서 빠져나가는 빛이므로 굴절률을 서로 바꾸고 법선을 뒤집음.
/// 전반사가 일어나면 `None`.
pub fn refract(incident: &Vector3<f32>, normal: &Vector3<f32>, ior: f32) -> Option<Unit<Vector3<f32>>> {
    let mut cos_i = incident.dot(normal).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (1.0, ior);
    let mut n = *normal;

    if cos_i < 0.0 {
        cos_i = -cos_i;
    } else {
        swap(&mut eta_i, &mut eta_t);
        n = -n;
    }

    let eta = eta_i / eta_t;
    // k < 0 이면 임계각을 넘은 것, 반사만 존재
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }

    Unit::try_new(incident * eta + n * (eta * cos_i - k.sqrt()), f32::EPSILON)
}

/// 편광되지 않은 빛의 프레넬 반사율 (Rs² + Rp²) / 2. 전반사면 1.
pub fn fresnel(incident: &Vector3<f32>, normal: &Vector3<f32>, ior: f32) -> f32 {
    let cos_i = incident.dot(normal).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (1.0, ior);
    if cos_i > 0.0 {
        swap(&mut eta_i, &mut eta_t);
    }

    let sin_t = eta_i / eta_t * (1.0 - cos_i * cos_i).max(0.0).sqrt();
    if sin_t >= 1.0 {
        return 1.0;
    }

    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();
    let cos_i = cos_i.abs();
    let rs = ((eta_t * cos_i) - (eta_i * cos_t)) / ((eta_t * cos_i) + (eta_i * cos_t));
    let rp = ((eta_i * cos_i) - (eta_t * cos_t)) / ((eta_i * cos_i) + (eta_t * cos_t));

    (rs * rs + rp * rp) / 2.0
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn normalizing_unit_vector_keeps_length() {
        let v = Vector3::new(0.0, 0.6, 0.8);
        assert_relative_eq!(normalize_or_zero(&v).norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(normalize_or_zero(&v), v, epsilon = 1e-6);
    }

    #[test]
    fn normalizing_zero_vector_gives_zero() {
        let v = normalize_or_zero(&Vector3::zeros());
        assert_eq!(v, Vector3::zeros());
        assert!(v.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let incident = Vector3::new(1.0, -1.0, 0.0).normalize();
        let normal = Vector3::y();
        let reflected = reflect(&incident, &normal);
        assert_relative_eq!(reflected, Vector3::new(1.0, 1.0, 0.0).normalize(), epsilon = 1e-6);
    }

    #[test]
    fn refract_straight_through_at_normal_incidence() {
        let refracted = refract(&-Vector3::y(), &Vector3::y(), 1.5).unwrap();
        assert_relative_eq!(refracted.into_inner(), -Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn refract_bends_toward_normal_entering_denser_medium() {
        let incident = Vector3::new(1.0, -1.0, 0.0).normalize();
        let refracted = refract(&incident, &Vector3::y(), 1.5).unwrap();

        // sin(t) = sin(i) / 1.5
        let sin_i = incident.x;
        assert_relative_eq!(refracted.x, sin_i / 1.5, epsilon = 1e-5);
        assert!(refracted.y < 0.0);
    }

    #[test]
    fn refract_reports_total_internal_reflection() {
        // 안쪽에서 거의 평행하게 빠져나가려는 빛
        let incident = Vector3::new(1.0, 0.1, 0.0).normalize();
        assert!(refract(&incident, &Vector3::y(), 1.5).is_none());
    }

    #[test]
    fn fresnel_at_normal_incidence() {
        let kr = fresnel(&-Vector3::y(), &Vector3::y(), 1.5);
        assert_abs_diff_eq!(kr, 0.04, epsilon = 1e-5);
    }

    #[test]
    fn fresnel_approaches_one_at_grazing_incidence() {
        let normal = Vector3::y();
        let mut previous = 0.0;
        for y in [-0.5, -0.1, -0.01, -1e-4] {
            let incident = Vector3::new(1.0, y, 0.0).normalize();
            let kr = fresnel(&incident, &normal, 1.5);
            assert!(kr > previous);
            previous = kr;
        }
        assert!(previous > 0.99, "kr = {previous}");
    }

    #[test]
    fn fresnel_is_one_under_total_internal_reflection() {
        let incident = Vector3::new(1.0, 0.1, 0.0).normalize();
        assert_eq!(fresnel(&incident, &Vector3::y(), 1.5), 1.0);
    }
}
