/// Trial division up to `sqrt(n)`, only trying odd divisors
#[inline]
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Smallest prime that is `>= n`
#[inline]
pub fn next_prime(n: usize) -> usize {
    (n..).find(|&i| is_prime(i)).unwrap_or(n)
}
