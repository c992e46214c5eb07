//! Multi-step sign-up wizard.
//!
//! DESIGN
//! ======
//! Pure local step tracking: nothing is persisted between steps and nothing
//! is sent until [`RegistrationForm::submit`] hands back a [`Registration`].
//! Moving forward validates the current step only; moving back never
//! validates, so a user can always retreat to fix an earlier answer.

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

use roles::Role;

use crate::net::types::{Registration, RoleDetails};

const MIN_PASSWORD_LEN: usize = 6;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;
const MAX_YEARS_EXPERIENCE: u8 = 60;

/// Wizard steps in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    Account,
    Profile,
    Role,
    Details,
    Review,
}

impl Step {
    pub const ALL: [Self; 5] = [Self::Account, Self::Profile, Self::Role, Self::Details, Self::Review];

    /// Zero-based position in the wizard.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Account => 0,
            Self::Profile => 1,
            Self::Role => 2,
            Self::Details => 3,
            Self::Review => 4,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    #[must_use]
    pub fn prev(self) -> Self {
        self.index().checked_sub(1).map_or(self, |i| Self::ALL[i])
    }
}

/// Form field an error is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    FullName,
    Phone,
    Role,
    StreetAddress,
    LotSize,
    ServiceArea,
    YearsExperience,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("registration can only be submitted from the review step")]
    NotAtReview,
    #[error("step {step:?} has {} invalid field(s)", .errors.len())]
    Invalid { step: Step, errors: Vec<FieldError> },
}

/// Sign-up wizard state. Text fields hold raw input as typed.
#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    step: Step,
    role: Option<Role>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub phone: String,
    pub street_address: String,
    pub lot_size_sqft: String,
    pub service_area: String,
    pub years_experience: String,
}

impl RegistrationForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Pick a role. Switching roles discards the other role's details.
    pub fn select_role(&mut self, role: Role) {
        if self.role != Some(role) {
            self.street_address.clear();
            self.lot_size_sqft.clear();
            self.service_area.clear();
            self.years_experience.clear();
        }
        self.role = Some(role);
    }

    /// `(current step number, total steps)`, one-based for display.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.step.index() + 1, Step::ALL.len())
    }

    /// Validate the current step and advance.
    ///
    /// # Errors
    ///
    /// Returns the current step's field errors; the step does not change.
    pub fn next(&mut self) -> Result<Step, Vec<FieldError>> {
        let errors = self.validate(self.step);
        if !errors.is_empty() {
            return Err(errors);
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Go back one step without validating.
    pub fn back(&mut self) -> Step {
        self.step = self.step.prev();
        self.step
    }

    /// Field errors for `step` given the current input.
    #[must_use]
    pub fn validate(&self, step: Step) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match step {
            Step::Account => {
                if !is_valid_email(&self.email) {
                    errors.push(FieldError::new(Field::Email, "enter a valid email address"));
                }
                if self.password.chars().count() < MIN_PASSWORD_LEN {
                    errors.push(FieldError::new(Field::Password, "password must be at least 6 characters"));
                }
                if self.confirm_password != self.password {
                    errors.push(FieldError::new(Field::ConfirmPassword, "passwords do not match"));
                }
            }
            Step::Profile => {
                if self.full_name.trim().is_empty() {
                    errors.push(FieldError::new(Field::FullName, "enter your name"));
                }
                if normalize_phone(&self.phone).is_none() {
                    errors.push(FieldError::new(Field::Phone, "enter a valid phone number"));
                }
            }
            Step::Role => match self.role {
                None => errors.push(FieldError::new(Field::Role, "choose an account type")),
                Some(role) if !role.is_self_assignable() => {
                    errors.push(FieldError::new(Field::Role, "this account type cannot be selected"));
                }
                Some(_) => {}
            },
            Step::Details => {
                if let Err(mut detail_errors) = self.details() {
                    errors.append(&mut detail_errors);
                }
            }
            Step::Review => {}
        }
        errors
    }

    /// Build the sign-up payload. Only allowed from the review step; every
    /// step is re-checked and the wizard jumps back to the first bad one.
    ///
    /// # Errors
    ///
    /// [`WizardError::NotAtReview`] before the last step, or
    /// [`WizardError::Invalid`] naming the step that failed.
    pub fn submit(&mut self) -> Result<Registration, WizardError> {
        if self.step != Step::Review {
            return Err(WizardError::NotAtReview);
        }
        for step in Step::ALL {
            let errors = self.validate(step);
            if !errors.is_empty() {
                self.step = step;
                return Err(WizardError::Invalid { step, errors });
            }
        }

        let role = self.role.ok_or(WizardError::Invalid {
            step: Step::Role,
            errors: vec![FieldError::new(Field::Role, "choose an account type")],
        })?;
        let details = self
            .details()
            .map_err(|errors| WizardError::Invalid { step: Step::Details, errors })?;
        let phone = normalize_phone(&self.phone).unwrap_or_default();

        Ok(Registration {
            email: self.email.trim().to_ascii_lowercase(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_owned(),
            phone,
            role,
            details,
        })
    }

    fn details(&self) -> Result<RoleDetails, Vec<FieldError>> {
        let mut errors = Vec::new();
        let details = match self.role {
            Some(Role::Customer) => {
                let street_address = self.street_address.trim().to_owned();
                if street_address.is_empty() {
                    errors.push(FieldError::new(Field::StreetAddress, "enter the service address"));
                }
                let lot = self.lot_size_sqft.trim();
                let lot_size_sqft = if lot.is_empty() {
                    None
                } else if let Ok(sqft) = lot.parse::<u32>() {
                    Some(sqft)
                } else {
                    errors.push(FieldError::new(Field::LotSize, "lot size must be a whole number"));
                    None
                };
                RoleDetails::Customer { street_address, lot_size_sqft }
            }
            Some(Role::Technician) => {
                let service_area = self.service_area.trim().to_owned();
                if service_area.is_empty() {
                    errors.push(FieldError::new(Field::ServiceArea, "enter your service area"));
                }
                let years_experience = match self.years_experience.trim().parse::<u8>() {
                    Ok(years) if years <= MAX_YEARS_EXPERIENCE => years,
                    _ => {
                        errors.push(FieldError::new(Field::YearsExperience, "enter years of experience"));
                        0
                    }
                };
                RoleDetails::Technician { service_area, years_experience }
            }
            Some(Role::Admin) | None => {
                return Err(vec![FieldError::new(Field::Role, "choose an account type")]);
            }
        };
        if errors.is_empty() { Ok(details) } else { Err(errors) }
    }
}

fn is_valid_email(raw: &str) -> bool {
    let raw = raw.trim();
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Digits-only phone number, or `None` if the input has stray characters or
/// the wrong number of digits.
fn normalize_phone(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if !raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'))
    {
        return None;
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS)
        .contains(&digits.len())
        .then_some(digits)
}
