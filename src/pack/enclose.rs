//! Smallest circle enclosing a set of circles (Welzl style, randomized order).

use super::{Circle, Lcg};
use tracing::warn;

pub(crate) fn enclose(circles: &[Circle], random: &mut Lcg) -> Circle {
    let mut circles = circles.to_vec();
    shuffle(&mut circles, random);

    let n = circles.len();
    let mut basis: Vec<Circle> = Vec::new();
    let mut enclosing: Option<Circle> = None;
    let mut i = 0;
    while i < n {
        let p = circles[i];
        match enclosing {
            Some(e) if encloses_weak(&e, &p) => i += 1,
            _ => {
                basis = extend_basis(&basis, p);
                enclosing = Some(enclose_basis(&basis));
                i = 0;
            }
        }
    }
    enclosing.unwrap_or_default()
}

fn shuffle(circles: &mut [Circle], random: &mut Lcg) {
    let mut m = circles.len();
    while m > 0 {
        let i = (random.next_f64() * m as f64) as usize;
        m -= 1;
        circles.swap(m, i.min(m));
    }
}

fn extend_basis(basis: &[Circle], p: Circle) -> Vec<Circle> {
    if encloses_weak_all(&p, basis) {
        return vec![p];
    }

    for b in basis {
        if encloses_not(&p, b) && encloses_weak_all(&enclose_basis2(b, &p), basis) {
            return vec![*b, p];
        }
    }

    for i in 0..basis.len().saturating_sub(1) {
        for j in (i + 1)..basis.len() {
            let (bi, bj) = (&basis[i], &basis[j]);
            if encloses_not(&enclose_basis2(bi, bj), &p)
                && encloses_not(&enclose_basis2(bi, &p), bj)
                && encloses_not(&enclose_basis2(bj, &p), bi)
                && encloses_weak_all(&enclose_basis3(bi, bj, &p), basis)
            {
                return vec![*bi, *bj, p];
            }
        }
    }

    warn!(basis = basis.len(), "could not extend enclosing basis, restarting from circle");
    vec![p]
}

fn encloses_not(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: &Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_basis2(a, b),
        [a, b, c] => enclose_basis3(a, b, c),
        _ => Circle::default(),
    }
}

fn enclose_basis2(a: &Circle, b: &Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    if l == 0.0 {
        return if a.r >= b.r { *a } else { *b };
    }
    Circle {
        x: (a.x + b.x + x21 / l * r21) / 2.0,
        y: (a.y + b.y + y21 / l * r21) / 2.0,
        r: (l + a.r + b.r) / 2.0,
    }
}

fn enclose_basis3(a: &Circle, b: &Circle, c: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Circle {
        x: x1 + xa + xb * r,
        y: y1 + ya + yb * r,
        r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(outer: &Circle, inner: &Circle) -> bool {
        let d = ((outer.x - inner.x).powi(2) + (outer.y - inner.y).powi(2)).sqrt();
        d + inner.r <= outer.r + 1e-6
    }

    #[test]
    fn single_circle_is_its_own_enclosure() {
        let c = Circle { x: 3.0, y: -2.0, r: 5.0 };
        let e = enclose(&[c], &mut Lcg::default());
        assert_eq!(e, c);
    }

    #[test]
    fn two_tangent_circles() {
        let a = Circle { x: -1.0, y: 0.0, r: 1.0 };
        let b = Circle { x: 1.0, y: 0.0, r: 1.0 };
        let e = enclose(&[a, b], &mut Lcg::default());
        assert!(e.x.abs() < 1e-9);
        assert!(e.y.abs() < 1e-9);
        assert!((e.r - 2.0).abs() < 1e-9);
    }

    #[test]
    fn enclosure_contains_every_circle() {
        let circles = [
            Circle { x: 0.0, y: 0.0, r: 2.0 },
            Circle { x: 5.0, y: 1.0, r: 1.0 },
            Circle { x: -3.0, y: 4.0, r: 1.5 },
            Circle { x: 1.0, y: -6.0, r: 0.5 },
            Circle { x: 2.0, y: 2.0, r: 0.1 },
        ];
        let e = enclose(&circles, &mut Lcg::default());
        for c in &circles {
            assert!(contains(&e, c), "{c:?} not inside {e:?}");
        }
    }
}
