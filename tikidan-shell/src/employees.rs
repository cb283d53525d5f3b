//! Employee directory operations
//!
//! Thin wrappers over the backend's directory endpoints. Every call rides
//! the session token; a 401 anywhere means the token is dead and the whole
//! session is torn down, not just the one call.

use crate::error::ShellError;
use crate::permissions::{PermissionResolver, PermissionSet, Role};
use crate::shell::Shell;
use tikidan_client::{ClientError, ClientResult, EmployeeCreate, EmployeeRecord, EmployeeUpdate};

impl Shell {
    async fn check_session<T>(&self, result: ClientResult<T>) -> Result<T, ShellError> {
        match result {
            Err(ClientError::Unauthorized) => {
                self.handle_unauthorized().await;
                Err(ShellError::SessionInvalid)
            }
            other => other.map_err(ShellError::from),
        }
    }

    /// All employees
    pub async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, ShellError> {
        let result = self.api_client().await.list_employees().await;
        self.check_session(result).await
    }

    /// Direct reports of the current user
    pub async fn team_members(&self) -> Result<Vec<EmployeeRecord>, ShellError> {
        let result = self.api_client().await.team_members().await;
        self.check_session(result).await
    }

    /// Create an employee record
    ///
    /// When no explicit permission set is given, the starting set is seeded
    /// from the assigned role's defaults. A failed defaults lookup seeds an
    /// empty set (fail closed) rather than aborting the creation.
    pub async fn create_employee(
        &self,
        mut employee: EmployeeCreate,
    ) -> Result<EmployeeRecord, ShellError> {
        if employee.permissions.is_none() {
            let resolver = PermissionResolver::new(self.api_client().await);
            let role = Role::from(employee.role.as_str());
            let defaults = match resolver.resolve_role_defaults(&role).await {
                Ok(set) => set,
                Err(ClientError::Unauthorized) => {
                    self.handle_unauthorized().await;
                    return Err(ShellError::SessionInvalid);
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        role = %role,
                        "role default lookup failed, starting with no permissions"
                    );
                    PermissionSet::empty()
                }
            };
            employee.permissions = Some(defaults.to_tags());
        }

        let result = self.api_client().await.create_employee(&employee).await;
        self.check_session(result).await
    }

    /// Update an employee record
    pub async fn update_employee(
        &self,
        id: &str,
        update: &EmployeeUpdate,
    ) -> Result<EmployeeRecord, ShellError> {
        let result = self.api_client().await.update_employee(id, update).await;
        self.check_session(result).await
    }

    /// Delete an employee record
    pub async fn delete_employee(&self, id: &str) -> Result<(), ShellError> {
        let result = self.api_client().await.delete_employee(id).await;
        self.check_session(result).await
    }
}
