//! User-facing message catalog.
//!
//! Single locale (Korean), matching the product's audience. The texts are
//! part of the observable contract of the flow; swapping them for another
//! locale must not change any behavior.

/// Rejected upload: not a JPEG or PNG file.
pub const UPLOAD_FORMAT: &str = "JPEG 또는 PNG 형식의 이미지 파일을 업로드해주세요.";

/// Future-face page: photo or gender selection missing.
pub const FUTURE_FACE_INPUT: &str = "사진을 업로드하고 성별을 선택해주세요.";

/// Animal page: photo, animal name, or style missing.
pub const ANIMAL_INPUT: &str = "사진을 업로드하고 동물 이름과 스타일을 선택해주세요.";

/// Daily cap reached; names the fixed limit.
pub const QUOTA_EXCEEDED: &str = "일일 사용 한도(10회)를 초과했습니다. 내일 다시 시도해주세요.";

/// Provider answered without an image.
pub const GENERATION_FAILED: &str = "AI가 이미지를 생성하지 못했습니다. 다른 사진으로 시도해보세요.";

/// Transport/auth/unexpected provider failure; detail stays in the logs.
pub const PROVIDER_FAILURE: &str = "이미지 생성 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

#[cfg(test)]
mod tests {
    use super::*;
    use mirae_quota::DAILY_LIMIT;

    #[test]
    fn test_quota_message_names_the_limit() {
        assert!(QUOTA_EXCEEDED.contains(&DAILY_LIMIT.to_string()));
    }
}
