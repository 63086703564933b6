//! Front-chain sibling packing.
//!
//! Circles are placed one by one tangent to two circles of the current front
//! chain, then the whole group is recentered on its enclosing circle.

use super::enclose::enclose;
use super::{Circle, Lcg};

/// Packs `circles` in place around the origin and returns the radius of the
/// enclosing circle.
pub(crate) fn pack_siblings(circles: &mut [Circle], random: &mut Lcg) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }

    let (first, second) = (circles[0], circles[1]);
    place(&second, &first, &mut circles[2]);

    // Front chain as a circular doubly linked list over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[a] = b;
    prev[2] = b;
    next[b] = 2;
    prev[a] = 2;
    next[2] = a;
    prev[b] = a;

    let mut i = 3;
    'pack: while i < n {
        let (ca, cb) = (circles[a], circles[b]);
        place(&ca, &cb, &mut circles[i]);
        let c = i;

        // Walk the chain from both ends looking for the closest intersection.
        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(&circles[j], &circles[c]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(&circles[k], &circles[c]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        prev[c] = a;
        next[c] = b;
        next[a] = c;
        prev[b] = c;
        b = c;

        // Next placement starts from the pair closest to the origin.
        let mut best = score(circles, &next, a);
        let mut node = next[c];
        while node != c {
            let s = score(circles, &next, node);
            if s < best {
                a = node;
                best = s;
            }
            node = next[node];
        }
        b = next[a];
        i += 1;
    }

    let mut front = vec![circles[b]];
    let mut node = next[b];
    while node != b {
        front.push(circles[node]);
        node = next[node];
    }
    let e = enclose(&front, random);

    for circle in circles.iter_mut() {
        circle.x -= e.x;
        circle.y -= e.y;
    }
    e.r
}

/// Positions `c` tangent to both `a` and `b`.
fn place(b: &Circle, a: &Circle, c: &mut Circle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 != 0.0 {
        let a2 = (a.r + c.r).powi(2);
        let b2 = (b.r + c.r).powi(2);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = &circles[node];
    let b = &circles[next[node]];
    let ab = a.r + b.r;
    if ab == 0.0 {
        return a.x * a.x + a.y * a.y;
    }
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}
