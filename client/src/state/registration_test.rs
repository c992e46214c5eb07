use super::*;

fn filled_account(form: &mut RegistrationForm) {
    form.email = "Casey@Example.com ".into();
    form.password = "mow-the-lawn".into();
    form.confirm_password = "mow-the-lawn".into();
}

fn filled_profile(form: &mut RegistrationForm) {
    form.full_name = "  Casey Green ".into();
    form.phone = "(555) 123-4567".into();
}

/// A customer form advanced all the way to review.
fn customer_at_review() -> RegistrationForm {
    let mut form = RegistrationForm::new();
    filled_account(&mut form);
    form.next().unwrap();
    filled_profile(&mut form);
    form.next().unwrap();
    form.select_role(Role::Customer);
    form.next().unwrap();
    form.street_address = "12 Maple Ave".into();
    form.lot_size_sqft = "8000".into();
    form.next().unwrap();
    form
}

fn fields(errors: &[FieldError]) -> Vec<Field> {
    errors.iter().map(|e| e.field).collect()
}

// =============================================================
// Step navigation
// =============================================================

#[test]
fn starts_at_account_step() {
    let form = RegistrationForm::new();
    assert_eq!(form.step(), Step::Account);
    assert_eq!(form.progress(), (1, 5));
}

#[test]
fn step_order_is_linear() {
    assert_eq!(Step::Account.next(), Step::Profile);
    assert_eq!(Step::Details.next(), Step::Review);
    assert_eq!(Step::Review.next(), Step::Review);
    assert_eq!(Step::Account.prev(), Step::Account);
    assert_eq!(Step::Review.prev(), Step::Details);
}

#[test]
fn next_blocks_on_invalid_step() {
    let mut form = RegistrationForm::new();
    let errors = form.next().unwrap_err();
    assert_eq!(fields(&errors), vec![Field::Email, Field::Password]);
    assert_eq!(form.step(), Step::Account);
}

#[test]
fn back_never_validates() {
    let mut form = customer_at_review();
    form.email.clear();
    assert_eq!(form.back(), Step::Details);
    assert_eq!(form.back(), Step::Role);
    assert_eq!(form.back(), Step::Profile);
    assert_eq!(form.back(), Step::Account);
    assert_eq!(form.back(), Step::Account);
}

// =============================================================
// Account + profile validation
// =============================================================

#[test]
fn rejects_malformed_emails() {
    let mut form = RegistrationForm::new();
    form.password = "123456".into();
    form.confirm_password = "123456".into();
    for bad in ["", "plain", "@example.com", "a@b", "a@.com", "a@b.", "a@@b.com", "a b@c.com"] {
        form.email = bad.into();
        assert_eq!(fields(&form.validate(Step::Account)), vec![Field::Email], "{bad:?}");
    }
}

#[test]
fn password_mismatch_is_reported() {
    let mut form = RegistrationForm::new();
    filled_account(&mut form);
    form.confirm_password = "something-else".into();
    assert_eq!(fields(&form.validate(Step::Account)), vec![Field::ConfirmPassword]);
}

#[test]
fn short_password_is_reported() {
    let mut form = RegistrationForm::new();
    form.email = "a@b.co".into();
    form.password = "12345".into();
    form.confirm_password = "12345".into();
    assert_eq!(fields(&form.validate(Step::Account)), vec![Field::Password]);
}

#[test]
fn phone_needs_ten_to_fifteen_digits() {
    assert_eq!(normalize_phone("555-123-4567").as_deref(), Some("5551234567"));
    assert_eq!(normalize_phone("+44 20 7946 0958").as_deref(), Some("442079460958"));
    assert_eq!(normalize_phone("555-1234"), None);
    assert_eq!(normalize_phone("555-123-4567 ext 9"), None);
}

#[test]
fn profile_requires_name() {
    let mut form = RegistrationForm::new();
    form.full_name = "   ".into();
    form.phone = "5551234567".into();
    assert_eq!(fields(&form.validate(Step::Profile)), vec![Field::FullName]);
}

// =============================================================
// Role + details
// =============================================================

#[test]
fn role_step_requires_choice() {
    let form = RegistrationForm::new();
    assert_eq!(fields(&form.validate(Step::Role)), vec![Field::Role]);
}

#[test]
fn admin_cannot_be_self_selected() {
    let mut form = RegistrationForm::new();
    form.select_role(Role::Admin);
    assert_eq!(fields(&form.validate(Step::Role)), vec![Field::Role]);
}

#[test]
fn switching_role_clears_details() {
    let mut form = RegistrationForm::new();
    form.select_role(Role::Technician);
    form.service_area = "Northside".into();
    form.years_experience = "4".into();
    form.select_role(Role::Technician);
    assert_eq!(form.service_area, "Northside");
    form.select_role(Role::Customer);
    assert!(form.service_area.is_empty());
    assert!(form.years_experience.is_empty());
}

#[test]
fn technician_details_required() {
    let mut form = RegistrationForm::new();
    form.select_role(Role::Technician);
    form.years_experience = "many".into();
    assert_eq!(
        fields(&form.validate(Step::Details)),
        vec![Field::ServiceArea, Field::YearsExperience]
    );
}

#[test]
fn customer_lot_size_must_be_numeric() {
    let mut form = RegistrationForm::new();
    form.select_role(Role::Customer);
    form.street_address = "1 Oak St".into();
    form.lot_size_sqft = "big".into();
    assert_eq!(fields(&form.validate(Step::Details)), vec![Field::LotSize]);
}

// =============================================================
// submit
// =============================================================

#[test]
fn submit_before_review_is_refused() {
    let mut form = RegistrationForm::new();
    assert_eq!(form.submit().unwrap_err(), WizardError::NotAtReview);
}

#[test]
fn submit_builds_normalized_registration() {
    let mut form = customer_at_review();
    assert_eq!(form.progress(), (5, 5));
    let reg = form.submit().unwrap();
    assert_eq!(reg.email, "casey@example.com");
    assert_eq!(reg.full_name, "Casey Green");
    assert_eq!(reg.phone, "5551234567");
    assert_eq!(reg.role, Role::Customer);
    assert_eq!(
        reg.details,
        RoleDetails::Customer { street_address: "12 Maple Ave".into(), lot_size_sqft: Some(8000) }
    );
}

#[test]
fn submit_jumps_back_to_first_invalid_step() {
    let mut form = customer_at_review();
    form.phone = "12".into();
    let err = form.submit().unwrap_err();
    match err {
        WizardError::Invalid { step, errors } => {
            assert_eq!(step, Step::Profile);
            assert_eq!(fields(&errors), vec![Field::Phone]);
        }
        WizardError::NotAtReview => panic!("expected invalid step"),
    }
    assert_eq!(form.step(), Step::Profile);
}

#[test]
fn technician_submit_carries_experience() {
    let mut form = RegistrationForm::new();
    filled_account(&mut form);
    filled_profile(&mut form);
    form.select_role(Role::Technician);
    form.service_area = "Riverside".into();
    form.years_experience = " 7 ".into();
    for _ in 0..4 {
        form.next().unwrap();
    }
    let reg = form.submit().unwrap();
    assert_eq!(reg.details, RoleDetails::Technician { service_area: "Riverside".into(), years_experience: 7 });
}
