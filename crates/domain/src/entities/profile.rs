//! Alumni profile: enumerations, completion form and the profile read model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::DomainError;
use crate::validation::collect_messages;
use crate::value_objects::is_valid_phone_number;

/// Latest graduation year accepted when completing a profile
pub const MAX_GRADUATION_YEAR: i32 = 2025;

/// Study programme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Course {
    SoftwareSystems,
    CyberSecurity,
    DataScience,
    TheoreticalComputerScience,
    AppliedMathematics,
}

impl Course {
    pub const ALL: [Self; 5] = [
        Self::SoftwareSystems,
        Self::CyberSecurity,
        Self::DataScience,
        Self::TheoreticalComputerScience,
        Self::AppliedMathematics,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::SoftwareSystems => "Software Systems",
            Self::CyberSecurity => "Cyber Security",
            Self::DataScience => "Data Science",
            Self::TheoreticalComputerScience => "Theoretical Computer Science",
            Self::AppliedMathematics => "Applied Mathematics",
        }
    }

    const fn wire_name(self) -> &'static str {
        match self {
            Self::SoftwareSystems => "SOFTWARE_SYSTEMS",
            Self::CyberSecurity => "CYBER_SECURITY",
            Self::DataScience => "DATA_SCIENCE",
            Self::TheoreticalComputerScience => "THEORETICAL_COMPUTER_SCIENCE",
            Self::AppliedMathematics => "APPLIED_MATHEMATICS",
        }
    }
}

/// Gender as recorded on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::PreferNotToSay];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::PreferNotToSay => "Prefer Not to Say",
        }
    }

    const fn wire_name(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::PreferNotToSay => "PREFER_NOT_TO_SAY",
        }
    }
}

/// Meal preference for event catering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodPreference {
    Veg,
    NonVeg,
}

impl FoodPreference {
    pub const ALL: [Self; 2] = [Self::Veg, Self::NonVeg];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Veg => "Veg",
            Self::NonVeg => "Non-Veg",
        }
    }

    const fn wire_name(self) -> &'static str {
        match self {
            Self::Veg => "VEG",
            Self::NonVeg => "NON_VEG",
        }
    }
}

macro_rules! wire_enum_text {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = DomainError;

            /// Accepts the wire name or the display label, case-insensitively
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|v| {
                        v.wire_name().eq_ignore_ascii_case(needle)
                            || v.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| DomainError::Validation(vec![format!("Unknown {}: {s}", $what)]))
            }
        }
    };
}

wire_enum_text!(Course, "course");
wire_enum_text!(Gender, "gender");
wire_enum_text!(FoodPreference, "food preference");

/// Profile completion form
#[derive(Debug, Clone, Default, Validate)]
pub struct ProfileForm {
    pub address: Option<String>,
    pub course: Option<Course>,
    #[validate(required(message = "Please select a food preference"))]
    pub food_preference: Option<FoodPreference>,
    pub designation: Option<String>,
    #[validate(required(message = "Please select a gender"))]
    pub gender: Option<Gender>,
    #[validate(range(max = 2025, message = "Graduation year must be 2025 or earlier"))]
    pub graduation_year: Option<i32>,
    #[validate(custom(function = "roll_number_present", message = "Roll number is required"))]
    pub roll_number: Option<String>,
    #[validate(custom(function = "ten_digits", message = "Phone number must be 10 digits"))]
    pub phone_number: String,
}

const PROFILE_FIELDS: &[&str] = &[
    "food_preference",
    "gender",
    "graduation_year",
    "roll_number",
    "phone_number",
];

impl ProfileForm {
    /// Validate and convert into the `PUT /completeprofiledetails` body
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] with one message per violated rule.
    pub fn into_request(self) -> Result<ProfileUpdateRequest, DomainError> {
        if let Err(errors) = self.validate() {
            return Err(DomainError::Validation(collect_messages(&errors, PROFILE_FIELDS)));
        }

        let food_preference = self.food_preference.ok_or_else(|| {
            DomainError::Validation(vec!["Please select a food preference".to_string()])
        })?;
        let gender = self
            .gender
            .ok_or_else(|| DomainError::Validation(vec!["Please select a gender".to_string()]))?;

        Ok(ProfileUpdateRequest {
            addr: self.address,
            course: self.course,
            food_preference,
            designation: self.designation,
            gender,
            gradyear: self.graduation_year,
            rollno: self.roll_number.map(|r| r.trim().to_string()),
            phonenumber: self.phone_number.trim().to_string(),
        })
    }
}

/// Body of `PUT /completeprofiledetails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
    pub food_preference: FoodPreference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradyear: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollno: Option<String>,
    pub phonenumber: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Profile details as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDetails {
    pub name: String,
    pub phone_number: Option<String>,
    pub roll_number: Option<String>,
    pub graduation_year: Option<i32>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub address: Option<String>,
    pub course: Option<String>,
}

/// Account with its profile, as returned by the user-profile endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub food_preference: Option<String>,
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfileResponse {
    pub user: Option<UserAccount>,
}

fn roll_number_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("roll_number"))
    } else {
        Ok(())
    }
}

fn ten_digits(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone_number(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ProfileForm {
        ProfileForm {
            address: Some("12 Lake Road".to_string()),
            course: Some(Course::DataScience),
            food_preference: Some(FoodPreference::Veg),
            designation: None,
            gender: Some(Gender::Female),
            graduation_year: Some(2019),
            roll_number: Some(" CS19-042 ".to_string()),
            phone_number: "9876543210".to_string(),
        }
    }

    #[test]
    fn complete_form_serializes_with_wire_names() {
        let request = complete_form().into_request().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["foodPreference"], "VEG");
        assert_eq!(json["gender"], "FEMALE");
        assert_eq!(json["course"], "DATA_SCIENCE");
        assert_eq!(json["gradyear"], 2019);
        assert_eq!(json["rollno"], "CS19-042");
        assert!(json.get("designation").is_none());
    }

    #[test]
    fn missing_selections_and_bad_phone_are_all_reported() {
        let form = ProfileForm {
            phone_number: "12345".to_string(),
            graduation_year: Some(2027),
            roll_number: Some("   ".to_string()),
            ..ProfileForm::default()
        };
        let err = form.into_request().unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "Please select a food preference",
                "Please select a gender",
                "Graduation year must be 2025 or earlier",
                "Roll number is required",
                "Phone number must be 10 digits",
            ]
        );
    }

    #[test]
    fn graduation_year_boundary() {
        let mut form = complete_form();
        form.graduation_year = Some(MAX_GRADUATION_YEAR);
        assert!(form.clone().into_request().is_ok());
        form.graduation_year = None;
        assert!(form.into_request().is_ok());
    }

    #[test]
    fn enums_parse_from_labels_and_wire_names() {
        assert_eq!("data_science".parse::<Course>().unwrap(), Course::DataScience);
        assert_eq!("Cyber Security".parse::<Course>().unwrap(), Course::CyberSecurity);
        assert_eq!("non-veg".parse::<FoodPreference>().unwrap(), FoodPreference::NonVeg);
        assert_eq!("PREFER_NOT_TO_SAY".parse::<Gender>().unwrap(), Gender::PreferNotToSay);
        assert!("astrology".parse::<Course>().is_err());
    }

    #[test]
    fn user_profile_tolerates_missing_fields() {
        let json = r#"{ "user": { "email": "a@b.co", "profile": { "name": "Asha" } } }"#;
        let parsed: UserProfileResponse = serde_json::from_str(json).unwrap();
        let user = parsed.user.unwrap();
        assert_eq!(user.profile.unwrap().name, "Asha");
        assert!(user.role.is_none());
    }
}
