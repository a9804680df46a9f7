//! Assertion helpers for bootstrap passes

use cdk_bootstrap_core::{ErrorKind, RoleKind};
use cdk_bootstrap_provisioner::{BootstrapPlan, ProvisionError};

/// Assert the pass failed in `operation` with the collaborator's message intact
pub fn assert_provider_failure(err: &ProvisionError, operation: &str, message: &str) {
    match err {
        ProvisionError::Provider {
            operation: op,
            source,
        } => {
            assert_eq!(*op, operation, "failure tagged with the wrong operation");
            assert!(
                source.to_string().contains(message),
                "collaborator message lost: {}",
                source
            );
        }
        other => panic!("expected a provider failure, got {:?}", other),
    }
}

pub fn assert_inconsistent_state(err: &ProvisionError) {
    assert_eq!(
        err.kind(),
        Some(ErrorKind::InconsistentState),
        "expected an inconsistent-state error, got {:?}",
        err
    );
}

pub fn assert_configuration_error(err: &ProvisionError) {
    assert!(
        err.is_configuration(),
        "expected a configuration error, got {:?}",
        err
    );
}

/// Assert every role output matches the created role handle
pub fn assert_role_outputs(plan: &BootstrapPlan) {
    assert_eq!(plan.role_handles.len(), 4, "expected four created roles");
    for kind in RoleKind::ALL {
        let handle = plan
            .role_handle(kind)
            .unwrap_or_else(|| panic!("no {} role was created", kind));
        assert_eq!(plan.outputs.role_arn(kind), Some(handle.arn.as_str()));
    }
}
