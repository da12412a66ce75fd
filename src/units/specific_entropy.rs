use serde::{Deserialize, Serialize};

/// 비엔트로피/비열 단위. 내부 기준은 J/(kg·K)이다.
///
/// 엔트로피와 정압/정적 비열이 같은 차원이라 함께 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecificEntropyUnit {
    JPerKgK,
    /// BTU/(lb·°R), BTU/(lb·°F)와 같은 값
    BtuPerPoundRankine,
}

/// 1 BTU(IT)/(lb·°R) = 4186.8 J/(kg·K)
pub const J_KGK_PER_BTU_LBR: f64 = 4_186.8;

/// 비엔트로피(또는 비열)를 변환한다.
pub fn convert_specific_entropy(
    value: f64,
    from: SpecificEntropyUnit,
    to: SpecificEntropyUnit,
) -> f64 {
    let base = match from {
        SpecificEntropyUnit::JPerKgK => value,
        SpecificEntropyUnit::BtuPerPoundRankine => value * J_KGK_PER_BTU_LBR,
    };
    match to {
        SpecificEntropyUnit::JPerKgK => base,
        SpecificEntropyUnit::BtuPerPoundRankine => base / J_KGK_PER_BTU_LBR,
    }
}
