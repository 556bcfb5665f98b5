use std::{collections::BTreeMap, fmt};

use crate::{Name, NameError, ReadError, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<Option<UserProfile>, ReadError>;
    async fn replace_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError>;

    fn validate_profile_name(&self, name: &str) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => Ok(name),
            Err(NameError::Empty) => Err(ValidationError::other("O nome é obrigatório.")),
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    fn validate_profile_weight(&self, weight: &str) -> Result<Option<f32>, ValidationError> {
        parse_optional_positive_decimal(weight, "O peso")
    }

    fn validate_profile_height(&self, height: &str) -> Result<Option<f32>, ValidationError> {
        parse_optional_positive_decimal(height, "A altura")
    }

    fn validate_profile_age(&self, age: &str) -> Result<Option<u32>, ValidationError> {
        parse_optional_positive_integer(age)
    }

    /// Validate all fields of the profile form at once.
    ///
    /// Every invalid field is reported, so that the form can mark all of them before the user
    /// tries to save again. Storage is never accessed.
    fn validate_profile(&self, form: &ProfileForm) -> Result<UserProfile, ProfileErrors> {
        let mut errors = ProfileErrors::default();

        let name = self
            .validate_profile_name(&form.name)
            .map_err(|err| errors.insert(ProfileField::Name, &err))
            .ok();
        let weight = self
            .validate_profile_weight(&form.weight)
            .map_err(|err| errors.insert(ProfileField::Weight, &err))
            .ok()
            .flatten();
        let height = self
            .validate_profile_height(&form.height)
            .map_err(|err| errors.insert(ProfileField::Height, &err))
            .ok()
            .flatten();
        let age = self
            .validate_profile_age(&form.age)
            .map_err(|err| errors.insert(ProfileField::Age, &err))
            .ok()
            .flatten();

        match name {
            Some(name) if errors.is_empty() => Ok(UserProfile {
                name,
                sex: form.sex,
                activity_level: form.activity_level,
                weight,
                height,
                age,
            }),
            _ => Err(errors),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Option<UserProfile>, ReadError>;
    async fn replace_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError>;
}

fn parse_optional_positive_decimal(
    value: &str,
    subject: &str,
) -> Result<Option<f32>, ValidationError> {
    let value = value.replace(',', ".");
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f32>() {
        Ok(parsed_value) if parsed_value.is_finite() && parsed_value > 0.0 => {
            Ok(Some(parsed_value))
        }
        Ok(_) => Err(ValidationError::Other(
            format!("{subject} deve ser um número positivo.").into(),
        )),
        Err(_) => Err(ValidationError::Other(
            format!("{subject} deve ser um número.").into(),
        )),
    }
}

fn parse_optional_positive_integer(value: &str) -> Result<Option<u32>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<u32>() {
        Ok(parsed_value) if parsed_value > 0 => Ok(Some(parsed_value)),
        _ => Err(ValidationError::other(
            "A idade deve ser um número inteiro positivo.",
        )),
    }
}

/// Basal metabolic rate in kcal per day (Mifflin-St Jeor).
#[allow(clippy::cast_precision_loss)]
fn bmr(sex: Sex, weight: f32, height: f32, age: u32) -> f32 {
    let base = 10.0 * weight + 6.25 * height - 5.0 * age as f32;
    match sex {
        Sex::MALE => base + 5.0,
        Sex::FEMALE => base - 161.0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tdee(bmr: f32, activity_level: ActivityLevel) -> u32 {
    (bmr * activity_level.multiplier()).round().max(0.0) as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: Name,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub weight: Option<f32>,
    pub height: Option<f32>,
    pub age: Option<u32>,
}

impl UserProfile {
    #[must_use]
    pub fn bmi(&self) -> Option<BMI> {
        BMI::new(self.weight?, self.height?)
    }

    /// Basal metabolic rate in kcal per day (Mifflin-St Jeor).
    #[must_use]
    pub fn bmr(&self) -> Option<f32> {
        let weight = self.weight.filter(|w| *w > 0.0)?;
        let height = self.height.filter(|h| *h > 0.0)?;
        let age = self.age.filter(|a| *a > 0)?;
        Some(bmr(self.sex, weight, height, age))
    }

    /// Total daily energy expenditure in kcal per day.
    #[must_use]
    pub fn tdee(&self) -> Option<u32> {
        Some(tdee(self.bmr()?, self.activity_level))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    FEMALE,
    MALE,
}

impl From<&str> for Sex {
    fn from(value: &str) -> Self {
        match value {
            "female" => Sex::FEMALE,
            _ => Sex::MALE,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Sex::FEMALE => "female",
                Sex::MALE => "male",
            }
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    #[must_use]
    pub fn iter() -> std::slice::Iter<'static, ActivityLevel> {
        static LEVELS: [ActivityLevel; 5] = [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ];
        LEVELS.iter()
    }

    #[must_use]
    pub fn multiplier(self) -> f32 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentário (pouco ou nenhum exercício)",
            ActivityLevel::Light => "Levemente Ativo (1-3 dias/semana)",
            ActivityLevel::Moderate => "Moderadamente Ativo (3-5 dias/semana)",
            ActivityLevel::Active => "Muito Ativo (6-7 dias/semana)",
            ActivityLevel::VeryActive => "Extremamente Ativo (trabalho físico + exercício)",
        }
    }
}

impl TryFrom<&str> for ActivityLevel {
    type Error = ActivityLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ActivityLevel::iter()
            .find(|level| level.key() == value)
            .copied()
            .ok_or_else(|| ActivityLevelError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ActivityLevelError {
    #[error("Invalid activity level: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct BMI {
    pub value: f32,
    pub category: BMICategory,
}

impl BMI {
    /// BMI rounded to one decimal, weight in kg and height in cm.
    #[must_use]
    pub fn new(weight: f32, height: f32) -> Option<Self> {
        if weight <= 0.0 || height <= 0.0 {
            return None;
        }
        let height_in_meters = height / 100.0;
        let value = (weight / (height_in_meters * height_in_meters) * 10.0).round() / 10.0;
        Some(Self {
            value,
            category: BMICategory::from(value),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum BMICategory {
    Underweight,
    Normal,
    Overweight,
    ObesityI,
    ObesityII,
    ObesityIII,
}

impl From<f32> for BMICategory {
    fn from(value: f32) -> Self {
        if value < 18.5 {
            BMICategory::Underweight
        } else if value < 24.9 {
            BMICategory::Normal
        } else if value < 29.9 {
            BMICategory::Overweight
        } else if value < 34.9 {
            BMICategory::ObesityI
        } else if value < 39.9 {
            BMICategory::ObesityII
        } else {
            BMICategory::ObesityIII
        }
    }
}

impl BMICategory {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BMICategory::Underweight => "Abaixo do peso",
            BMICategory::Normal => "Peso normal",
            BMICategory::Overweight => "Sobrepeso",
            BMICategory::ObesityI => "Obesidade Grau I",
            BMICategory::ObesityII => "Obesidade Grau II",
            BMICategory::ObesityIII => "Obesidade Grau III",
        }
    }
}

/// Raw text input of the profile form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub weight: String,
    pub height: String,
    pub age: String,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            sex: Sex::MALE,
            activity_level: ActivityLevel::Moderate,
            weight: String::new(),
            height: String::new(),
            age: String::new(),
        }
    }
}

impl ProfileForm {
    /// BMI of the values entered so far, ignoring invalid fields.
    #[must_use]
    pub fn bmi(&self) -> Option<BMI> {
        BMI::new(self.parsed_weight()?, self.parsed_height()?)
    }

    /// TDEE of the values entered so far, ignoring invalid fields.
    #[must_use]
    pub fn tdee(&self) -> Option<u32> {
        let age = parse_optional_positive_integer(&self.age).ok().flatten()?;
        let bmr = bmr(self.sex, self.parsed_weight()?, self.parsed_height()?, age);
        Some(tdee(bmr, self.activity_level))
    }

    fn parsed_weight(&self) -> Option<f32> {
        parse_optional_positive_decimal(&self.weight, "O peso")
            .ok()
            .flatten()
    }

    fn parsed_height(&self) -> Option<f32> {
        parse_optional_positive_decimal(&self.height, "A altura")
            .ok()
            .flatten()
    }
}

impl From<&UserProfile> for ProfileForm {
    fn from(value: &UserProfile) -> Self {
        Self {
            name: value.name.to_string(),
            sex: value.sex,
            activity_level: value.activity_level,
            weight: value.weight.map(|w| w.to_string()).unwrap_or_default(),
            height: value.height.map(|h| h.to_string()).unwrap_or_default(),
            age: value.age.map(|a| a.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProfileField {
    Name,
    Weight,
    Height,
    Age,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileErrors(BTreeMap<ProfileField, String>);

impl ProfileErrors {
    fn insert(&mut self, field: ProfileField, error: &ValidationError) {
        self.0.insert(field, error.to_string());
    }

    #[must_use]
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = ProfileField> + '_ {
        self.0.keys().copied()
    }
}
