//! Additive scoring for TLS probe results
//!
//! Independent factors contribute non-negative points to a capped total. Any
//! critical failure zeroes the score and forces grade F, overriding all
//! earned points.

use crate::models::Grade;

/// Accumulated scoring outcome
#[derive(Debug, Clone)]
pub struct ScoreCard {
    pub score: u32,
    pub grade: Grade,
    pub reasons: Vec<String>,
    pub critical_failure: bool,
}

/// Score a probe from its extracted facts.
///
/// Max total: 30 (validity) + 20 (protocol) + 10 (cipher) + 40 (headers) = 100.
pub fn score_probe(
    days_left: i64,
    protocol: &str,
    cipher_bits: u32,
    header_bonus: u32,
) -> ScoreCard {
    let mut score: u32 = 0;
    let mut reasons = Vec::new();
    let mut critical_failure = false;

    if days_left >= 0 {
        score += 30;
        reasons.push("Valid Certificate (+30)".to_string());
    } else {
        reasons.push("Certificate EXPIRED (Critical)".to_string());
        critical_failure = true;
    }

    match protocol {
        "TLSv1.3" => {
            score += 20;
            reasons.push("Modern Protocol TLS 1.3 (+20)".to_string());
        }
        "TLSv1.2" => {
            score += 15;
            reasons.push("Standard Protocol TLS 1.2 (+15)".to_string());
        }
        _ => {
            reasons.push("Obsolete/Weak Protocol (0)".to_string());
            critical_failure = true;
        }
    }

    if cipher_bits >= 128 {
        score += 10;
        reasons.push("Strong Encryption >= 128 bit (+10)".to_string());
    } else {
        reasons.push("Weak Encryption (0)".to_string());
        critical_failure = true;
    }

    if header_bonus > 0 {
        score += header_bonus;
        reasons.push(format!("Security Headers Bonus (+{})", header_bonus));
    }

    score = score.min(100);

    let (score, grade) = if critical_failure {
        (0, Grade::F)
    } else {
        (score, Grade::from_score(score))
    };

    ScoreCard {
        score,
        grade,
        reasons,
        critical_failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_score() {
        let card = score_probe(90, "TLSv1.3", 256, 40);
        assert_eq!(card.score, 100);
        assert_eq!(card.grade, Grade::APlus);
        assert!(!card.critical_failure);
        assert_eq!(card.reasons.len(), 4);
    }

    #[test]
    fn test_expired_certificate_is_critical() {
        // Expiry zeroes everything, regardless of protocol/cipher/headers
        let card = score_probe(-1, "TLSv1.3", 256, 40);
        assert_eq!(card.score, 0);
        assert_eq!(card.grade, Grade::F);
        assert!(card.critical_failure);
        assert!(card
            .reasons
            .iter()
            .any(|r| r.contains("Certificate EXPIRED")));
    }

    #[test]
    fn test_tls12_no_headers_is_c() {
        // 30 + 15 + 10 = 55
        let card = score_probe(30, "TLSv1.2", 128, 0);
        assert_eq!(card.score, 55);
        assert_eq!(card.grade, Grade::C);
        // No bonus line when bonus is zero
        assert_eq!(card.reasons.len(), 3);
    }

    #[test]
    fn test_obsolete_protocol_is_critical() {
        let card = score_probe(90, "TLSv1.1", 256, 40);
        assert_eq!(card.score, 0);
        assert_eq!(card.grade, Grade::F);
        assert!(card.critical_failure);
    }

    #[test]
    fn test_weak_cipher_is_critical() {
        let card = score_probe(90, "TLSv1.3", 64, 40);
        assert_eq!(card.score, 0);
        assert_eq!(card.grade, Grade::F);
        assert!(card.critical_failure);
    }

    #[test]
    fn test_expiring_today_still_counts() {
        let card = score_probe(0, "TLSv1.3", 256, 0);
        assert_eq!(card.score, 60);
        assert_eq!(card.grade, Grade::C);
    }

    #[test]
    fn test_partial_header_bonus() {
        // 30 + 20 + 10 + 25 = 85 -> A
        let card = score_probe(10, "TLSv1.3", 128, 25);
        assert_eq!(card.score, 85);
        assert_eq!(card.grade, Grade::A);
        assert!(card
            .reasons
            .iter()
            .any(|r| r == "Security Headers Bonus (+25)"));
    }
}
