//! Blending utilities for Value types.
//! - f32 linear interpolation for floats and vector components
//! - quaternion slerp (shortest-arc) and composition
//! - Euler (degrees) to quaternion conversion
//! - HSV color lerp and Catmull-Rom spline evaluation

use crate::Value;

/// Linear interpolation for f32
#[inline]
pub fn lerp_f(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Lerp for fixed-size arrays
#[inline]
pub fn lerp_array<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    let mut out = [0.0f32; N];
    for i in 0..N {
        out[i] = lerp_f(a[i], b[i], t);
    }
    out
}

/// Normalize a quaternion represented as [x,y,z,w]
pub fn normalize_quat(q: [f32; 4]) -> [f32; 4] {
    let mag = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if mag == 0.0 {
        [0.0, 0.0, 0.0, 1.0]
    } else {
        [q[0] / mag, q[1] / mag, q[2] / mag, q[3] / mag]
    }
}

/// Slerp between two unit quaternions q1, q2
pub fn slerp(q1: [f32; 4], q2: [f32; 4], t: f32) -> [f32; 4] {
    let qa = normalize_quat(q1);
    let mut qb = normalize_quat(q2);

    let mut dot = qa[0] * qb[0] + qa[1] * qb[1] + qa[2] * qb[2] + qa[3] * qb[3];

    // Take the short path.
    if dot < 0.0 {
        qb = [-qb[0], -qb[1], -qb[2], -qb[3]];
        dot = -dot;
    }

    // Nearly parallel: fall back to normalized lerp.
    const DOT_THRESHOLD: f32 = 0.9995;
    if dot > DOT_THRESHOLD {
        return normalize_quat(lerp_array(&qa, &qb, t));
    }

    let theta_0 = dot.clamp(-1.0, 1.0).acos();
    let theta = theta_0 * t;
    let sin_theta = theta.sin();
    let sin_theta_0 = theta_0.sin();

    let s0 = ((theta_0 - theta).sin()) / sin_theta_0;
    let s1 = sin_theta / sin_theta_0;

    [
        s0 * qa[0] + s1 * qb[0],
        s0 * qa[1] + s1 * qb[1],
        s0 * qa[2] + s1 * qb[2],
        s0 * qa[3] + s1 * qb[3],
    ]
}

/// Hamilton product `a * b` (apply `b`, then `a`).
pub fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

/// Euler angles in degrees to a quaternion, rotating about Z, then X, then Y.
pub fn quat_from_euler_degrees(euler: [f32; 3]) -> [f32; 4] {
    let half = |deg: f32| deg.to_radians() * 0.5;
    let (sx, cx) = half(euler[0]).sin_cos();
    let (sy, cy) = half(euler[1]).sin_cos();
    let (sz, cz) = half(euler[2]).sin_cos();
    let qx = [sx, 0.0, 0.0, cx];
    let qy = [0.0, sy, 0.0, cy];
    let qz = [0.0, 0.0, sz, cz];
    quat_mul(quat_mul(qy, qx), qz)
}

/// RGB (0..1) to HSV (0..1 each).
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };
    if delta <= 0.0 {
        return [0.0, s, v];
    }
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    [h / 6.0, s, v]
}

/// HSV (0..1 each) to RGB (0..1).
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

/// Lerp two rgba colors through HSV space; alpha blends linearly.
pub fn lerp_hsv(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let ha = rgb_to_hsv(a[0], a[1], a[2]);
    let hb = rgb_to_hsv(b[0], b[1], b[2]);
    let h = lerp_array(&ha, &hb, t);
    let rgb = hsv_to_rgb(h[0], h[1], h[2]);
    [rgb[0], rgb[1], rgb[2], lerp_f(a[3], b[3], t)]
}

/// Uniform Catmull-Rom segment between `p1` and `p2`.
pub fn catmull_rom(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3], p3: [f32; 3], t: f32) -> [f32; 3] {
    let t2 = t * t;
    let t3 = t2 * t;
    let mut out = [0.0f32; 3];
    for i in 0..3 {
        out[i] = 0.5
            * (2.0 * p1[i]
                + (-p0[i] + p2[i]) * t
                + (2.0 * p0[i] - 5.0 * p1[i] + 4.0 * p2[i] - p3[i]) * t2
                + (-p0[i] + 3.0 * p1[i] - 3.0 * p2[i] + p3[i]) * t3);
    }
    out
}

/// Blend two Values of the same kind. Mismatched kinds resolve to `b`.
pub fn blend_values(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Float(af), Value::Float(bf)) => Value::Float(lerp_f(*af, *bf, t)),
        (Value::Vec3(aa), Value::Vec3(bb)) => Value::Vec3(lerp_array(aa, bb, t)),
        (Value::Vec4(aa), Value::Vec4(bb)) => Value::Vec4(lerp_array(aa, bb, t)),
        (Value::Quat(aq), Value::Quat(bq)) => Value::Quat(slerp(*aq, *bq, t)),
        _ => *b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "left={a} right={b}");
    }

    #[test]
    fn slerp_halfway_about_y() {
        let a = [0.0, 0.0, 0.0, 1.0];
        let b = quat_from_euler_degrees([0.0, 90.0, 0.0]);
        let mid = slerp(a, b, 0.5);
        let expected = quat_from_euler_degrees([0.0, 45.0, 0.0]);
        for i in 0..4 {
            approx(mid[i], expected[i]);
        }
    }

    #[test]
    fn euler_single_axis() {
        let q = quat_from_euler_degrees([90.0, 0.0, 0.0]);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        approx(q[0], s);
        approx(q[3], s);
        approx(q[1], 0.0);
        approx(q[2], 0.0);
    }

    #[test]
    fn hsv_roundtrip_primary() {
        let hsv = rgb_to_hsv(1.0, 0.0, 0.0);
        approx(hsv[0], 0.0);
        let rgb = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        approx(rgb[0], 0.0);
        approx(rgb[1], 1.0);
        approx(rgb[2], 0.0);
    }

    #[test]
    fn catmull_rom_hits_endpoints() {
        let p = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 1.0, 0.0], [3.0, 1.0, 0.0]];
        let start = catmull_rom(p[0], p[1], p[2], p[3], 0.0);
        let end = catmull_rom(p[0], p[1], p[2], p[3], 1.0);
        for i in 0..3 {
            approx(start[i], p[1][i]);
            approx(end[i], p[2][i]);
        }
    }

    #[test]
    fn mismatched_kinds_take_right() {
        let out = blend_values(&Value::Float(1.0), &Value::vec3(1.0, 2.0, 3.0), 0.25);
        assert_eq!(out, Value::vec3(1.0, 2.0, 3.0));
    }
}
