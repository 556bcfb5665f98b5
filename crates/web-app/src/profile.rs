use reisfit_domain::{self as domain, ProfileRepository, ProfileService};

/// Profile section of the settings screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSettings {
    pub form: domain::ProfileForm,
    pub errors: domain::ProfileErrors,
    profile: Option<domain::UserProfile>,
}

impl ProfileSettings {
    pub async fn load<R: ProfileRepository>(
        service: &domain::Service<R>,
    ) -> Result<Self, domain::ReadError> {
        Ok(Self::new(service.get_profile().await?))
    }

    #[must_use]
    pub fn new(profile: Option<domain::UserProfile>) -> Self {
        Self {
            form: profile
                .as_ref()
                .map(domain::ProfileForm::from)
                .unwrap_or_default(),
            errors: domain::ProfileErrors::default(),
            profile,
        }
    }

    /// Last saved profile.
    #[must_use]
    pub fn profile(&self) -> Option<&domain::UserProfile> {
        self.profile.as_ref()
    }

    /// BMI of the values currently entered in the form.
    #[must_use]
    pub fn bmi(&self) -> Option<domain::BMI> {
        self.form.bmi()
    }

    /// TDEE of the values currently entered in the form.
    #[must_use]
    pub fn tdee(&self) -> Option<u32> {
        self.form.tdee()
    }

    /// Validate the form and store the profile if all fields are valid.
    pub async fn save<R: ProfileRepository>(
        &mut self,
        service: &domain::Service<R>,
    ) -> Result<domain::UserProfile, SaveError> {
        let profile = match service.validate_profile(&self.form) {
            Ok(profile) => profile,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SaveError::Invalid(errors));
            }
        };
        self.errors = domain::ProfileErrors::default();
        let profile = service.replace_profile(profile).await?;
        self.profile = Some(profile.clone());
        Ok(profile)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("invalid profile")]
    Invalid(domain::ProfileErrors),
    #[error(transparent)]
    Storage(#[from] domain::UpdateError),
}
