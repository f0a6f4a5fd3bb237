//! User-facing texts (Turkish, the portal's only locale)

pub const AUTH_PENDING: &str = "Sunucuya bağlanılıyor...";
pub const AUTH_REDIRECT_SUFFIX: &str = "Yönlendiriliyorsunuz...";
pub const AUTH_FALLBACK_ERROR: &str = "Bilinmeyen bir hata oluştu.";

pub const FEEDBACK_PENDING: &str = "Geri bildiriminiz gönderiliyor...";
pub const FEEDBACK_FALLBACK_ERROR: &str = "Bilinmeyen bir API hatası oluştu.";
pub const FEEDBACK_MISSING_FIELDS: &str = "Lütfen tür ve içerik girin.";
pub const FEEDBACK_LOGIN_REQUIRED: &str =
    "Hata: Geri bildirim göndermek için giriş yapmış olmalısınız.";

pub const LOGIN_TITLE: &str = "Kullanıcı Girişi";
pub const REGISTER_TITLE: &str = "Yeni Kullanıcı Kaydı";

pub const EXPIRY_INVALID: &str = "Tarih Bilgisi Geçersiz";
pub const EXPIRY_UNKNOWN: &str = "Tarih Bilinmiyor";

/// Application error, server text verbatim behind a generic label
pub fn error_label(message: &str) -> String {
    format!("Hata: {message}")
}

/// Transport failure, naming the backend that could not be reached
pub fn unreachable(base_url: &str) -> String {
    format!("Ağ Hatası: Sunucuya ulaşılamıyor ({base_url}).")
}

/// Success text shown before the profile redirect
pub fn redirecting(server_message: &str) -> String {
    if server_message.is_empty() {
        AUTH_REDIRECT_SUFFIX.to_string()
    } else {
        format!("{server_message} {AUTH_REDIRECT_SUFFIX}")
    }
}

/// Remaining-days line for the profile page
pub fn key_remaining_days(days: i64) -> String {
    if days >= 9_999 {
        "Key süresi: Sınırsız".to_string()
    } else {
        format!("Key süresi: {days} gün kaldı")
    }
}
