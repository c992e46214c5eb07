use super::*;

// =============================================================================
// claim parsing
// =============================================================================

#[test]
fn from_claim_accepts_known_roles() {
    assert_eq!(Role::from_claim("customer"), Some(Role::Customer));
    assert_eq!(Role::from_claim("technician"), Some(Role::Technician));
    assert_eq!(Role::from_claim("admin"), Some(Role::Admin));
}

#[test]
fn from_claim_ignores_case_and_whitespace() {
    assert_eq!(Role::from_claim("  Admin "), Some(Role::Admin));
    assert_eq!(Role::from_claim("TECHNICIAN"), Some(Role::Technician));
}

#[test]
fn from_claim_unknown_is_none() {
    assert_eq!(Role::from_claim("gardener"), None);
    assert_eq!(Role::from_claim(""), None);
}

#[test]
fn from_str_unknown_is_error() {
    let err = "owner".parse::<Role>().unwrap_err();
    assert_eq!(err, RoleError::Unknown("owner".into()));
    assert_eq!(err.to_string(), "unknown role: \"owner\"");
}

#[test]
fn display_matches_claim_value() {
    for role in Role::ALL {
        assert_eq!(role.to_string(), role.as_str());
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
    }
}

// =============================================================================
// paths and groups
// =============================================================================

#[test]
fn dashboard_paths() {
    assert_eq!(Role::Admin.dashboard_path(), "/(admin)/dashboard");
    assert_eq!(Role::Technician.dashboard_path(), "/(technician)/dashboard");
    assert_eq!(Role::Customer.dashboard_path(), "/(customer)/dashboard");
}

#[test]
fn route_group_maps_back_to_role() {
    for role in Role::ALL {
        assert_eq!(Role::from_route_group(role.route_group()), Some(role));
    }
    assert_eq!(Role::from_route_group("(auth)"), None);
    assert_eq!(Role::from_route_group("admin"), None);
}

#[test]
fn only_admin_is_not_self_assignable() {
    assert!(Role::Customer.is_self_assignable());
    assert!(Role::Technician.is_self_assignable());
    assert!(!Role::Admin.is_self_assignable());
}

#[test]
fn redirect_priority_puts_admin_first() {
    assert_eq!(Role::ALL, [Role::Admin, Role::Technician, Role::Customer]);
}

// =============================================================================
// serde + claims
// =============================================================================

#[test]
fn serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Technician).unwrap(), "\"technician\"");
    let role: Role = serde_json::from_str("\"customer\"").unwrap();
    assert_eq!(role, Role::Customer);
}

#[test]
fn role_from_claims_reads_user_role() {
    let claims = serde_json::json!({"sub": "u1", "user_role": "admin"});
    assert_eq!(role_from_claims(&claims), Some(Role::Admin));
}

#[test]
fn role_from_claims_missing_or_null() {
    assert_eq!(role_from_claims(&serde_json::json!({"sub": "u1"})), None);
    assert_eq!(role_from_claims(&serde_json::json!({"user_role": null})), None);
    assert_eq!(role_from_claims(&serde_json::json!({"user_role": 3})), None);
}
