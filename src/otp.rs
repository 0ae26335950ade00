use rand::Rng;

pub const OTP_LENGTH: usize = 6;

const DIGITS: &[u8; 10] = b"0123456789";

/// Generate a 6-digit OTP code. Each digit is drawn on its own, so leading
/// zeros are as likely as any other digit.
pub fn generate_otp() -> String {
    generate_otp_with(&mut rand::thread_rng())
}

pub fn generate_otp_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..OTP_LENGTH)
        .map(|_| char::from(DIGITS[rng.gen_range(0..DIGITS.len())]))
        .collect()
}

pub fn otp_message(otp: &str) -> String {
    format!("Your OTP code is: {otp}. Please use it within 5 minutes.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..1000 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_LENGTH, "unexpected length: {otp}");
            assert!(otp.chars().all(|c| c.is_ascii_digit()), "non-digit in {otp}");
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate_otp_with(&mut StdRng::seed_from_u64(7));
        let b = generate_otp_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), OTP_LENGTH);
    }

    #[test]
    fn otp_distribution_is_not_degenerate() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let otps: Vec<String> = (0..1000).map(|_| generate_otp_with(&mut rng)).collect();

        let unique: HashSet<&String> = otps.iter().collect();
        assert!(
            unique.len() >= 980,
            "got {} unique codes out of 1000",
            unique.len()
        );

        // every position sees every digit
        for position in 0..OTP_LENGTH {
            let seen: HashSet<u8> = otps.iter().map(|otp| otp.as_bytes()[position]).collect();
            assert_eq!(seen.len(), 10, "position {position} saw {seen:?}");
        }
    }

    #[test]
    fn message_embeds_code() {
        assert_eq!(
            otp_message("012345"),
            "Your OTP code is: 012345. Please use it within 5 minutes."
        );
    }
}
