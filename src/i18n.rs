//! Localised labels for the login form
//!
//! Plain string lookup keyed by language and user type. Only the login
//! form is translated; role screens stay in English.

use crate::session::{Language, UserType};

/// Labels rendered by the login view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginStrings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub code: &'static str,
    pub role: &'static str,
    pub send_code: &'static str,
    pub verify: &'static str,
    pub language: &'static str,
    pub sending: &'static str,
    pub verifying: &'static str,
}

pub fn login_strings(language: Language, user_type: UserType) -> LoginStrings {
    let pilgrim = user_type == UserType::Pilgrim;

    match language {
        Language::En => LoginStrings {
            title: if pilgrim { "SafeYatra Pilgrim" } else { "Command Center" },
            subtitle: if pilgrim {
                "Your safety companion for Simhastha 2028"
            } else {
                "Emergency Response Dashboard"
            },
            email: "Email Address",
            phone: "Phone Number",
            code: "Enter OTP",
            role: "Select Role",
            send_code: "Send OTP",
            verify: "Verify & Login",
            language: "Language",
            sending: "Sending...",
            verifying: "Verifying...",
        },
        Language::Hi => LoginStrings {
            title: if pilgrim { "सेफयात्रा यात्री" } else { "नियंत्रण केंद्र" },
            subtitle: if pilgrim {
                "सिंहस्थ 2028 के लिए आपका सुरक्षा साथी"
            } else {
                "आपातकालीन प्रतिक्रिया डैशबोर्ड"
            },
            email: "ईमेल पता",
            phone: "फोन नंबर",
            code: "OTP दर्ज करें",
            role: "भूमिका चुनें",
            send_code: "OTP भेजें",
            verify: "सत्यापित करें और लॉगिन करें",
            language: "भाषा",
            sending: "भेजा जा रहा है...",
            verifying: "सत्यापन हो रहा है...",
        },
        Language::Mr => LoginStrings {
            title: if pilgrim { "सेफयात्रा यात्री" } else { "नियंत्रण केंद्र" },
            subtitle: if pilgrim {
                "सिंहस्थ 2028 साठी तुमचा सुरक्षा साथी"
            } else {
                "आणीबाणी प्रतिसाद डॅशबोर्ड"
            },
            email: "ईमेल पत्ता",
            phone: "फोन नंबर",
            code: "OTP प्रविष्ट करा",
            role: "भूमिका निवडा",
            send_code: "OTP पाठवा",
            verify: "सत्यापित करा आणि लॉगिन करा",
            language: "भाषा",
            sending: "पाठवत आहे...",
            verifying: "सत्यापन होत आहे...",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_depends_on_user_type() {
        assert_eq!(
            login_strings(Language::En, UserType::Pilgrim).title,
            "SafeYatra Pilgrim"
        );
        assert_eq!(
            login_strings(Language::En, UserType::Command).title,
            "Command Center"
        );
    }

    #[test]
    fn every_language_has_labels() {
        for lang in [Language::En, Language::Hi, Language::Mr] {
            for user_type in UserType::ALL {
                let strings = login_strings(lang, user_type);
                assert!(!strings.send_code.is_empty());
                assert!(!strings.verify.is_empty());
                assert!(!strings.sending.is_empty());
            }
        }
    }
}
