// tikidan-client/tests/client_integration.rs
// Integration tests against the in-process mock backend

use std::sync::Arc;
use tikidan_auth_mock::{router, AppState};
use tikidan_client::{ClientConfig, ClientError, EmployeeCreate, HttpClient};

async fn spawn_mock() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(AppState::default()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn logged_in_client(base_url: &str, email: &str, password: &str) -> HttpClient {
    let client = ClientConfig::new(base_url).build_http_client();
    let response = client.login(email, password).await.unwrap();
    assert!(response.success, "seed login must succeed");
    client.with_token(response.token.unwrap())
}

#[tokio::test]
async fn config_builds_client_with_token() {
    let config = ClientConfig::new("http://localhost:5000")
        .with_token("tok-1")
        .with_timeout(5);
    let client = config.build_http_client();
    assert_eq!(client.token(), Some("tok-1"));

    let mut client = ClientConfig::default().build_http_client();
    assert_eq!(client.token(), None);
    client = client.with_token("tok-2");
    assert_eq!(client.token(), Some("tok-2"));
    client.clear_token();
    assert_eq!(client.token(), None);
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let base_url = spawn_mock().await;
    let client = ClientConfig::new(base_url.as_str()).build_http_client();

    let response = client.login("hr@tikidan.com", "hr123").await.unwrap();
    assert!(response.success);
    assert!(response.token.is_some());
    let user = response.user.unwrap();
    assert_eq!(user.role, "hr_manager");
    assert_eq!(user.department, "People");
}

#[tokio::test]
async fn rejected_login_is_a_normal_response() {
    let base_url = spawn_mock().await;
    let client = ClientConfig::new(base_url.as_str()).build_http_client();

    let response = client.login("hr@tikidan.com", "wrong").await.unwrap();
    assert!(!response.success);
    assert!(response.token.is_none());
    assert!(response.user.is_none());
    assert_eq!(response.message.as_deref(), Some("Invalid email or password"));
}

#[tokio::test]
async fn permission_lookup_requires_a_token() {
    let base_url = spawn_mock().await;
    let client = ClientConfig::new(base_url.as_str()).build_http_client();

    let err = client.user_permissions().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn garbage_token_maps_to_unauthorized() {
    let base_url = spawn_mock().await;
    let client = ClientConfig::new(base_url.as_str())
        .with_token("not-a-jwt")
        .build_http_client();

    let err = client.list_employees().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn user_permissions_follow_the_role() {
    let base_url = spawn_mock().await;
    let client = logged_in_client(&base_url, "hr@tikidan.com", "hr123").await;

    let response = client.user_permissions().await.unwrap();
    assert_eq!(response.role, "hr_manager");
    assert_eq!(response.display_name, "Hr Manager");
    assert!(response.permissions.contains(&"employees".to_string()));
    assert!(!response.permissions.contains(&"*".to_string()));
}

#[tokio::test]
async fn role_defaults_lookup() {
    let base_url = spawn_mock().await;
    let client = logged_in_client(&base_url, "admin@tikidan.com", "admin123").await;

    let admin = client.role_permissions("admin").await.unwrap();
    assert_eq!(admin.permissions, vec!["*".to_string()]);

    let unknown = client.role_permissions("warp_navigator").await.unwrap();
    assert!(unknown.permissions.is_empty());
}

#[tokio::test]
async fn employee_crud_round_trip() {
    let base_url = spawn_mock().await;
    let client = logged_in_client(&base_url, "admin@tikidan.com", "admin123").await;

    let before = client.list_employees().await.unwrap().len();

    let created = client
        .create_employee(&EmployeeCreate {
            name: "Noa Fel".to_string(),
            email: "noa@tikidan.com".to_string(),
            password: "noa123".to_string(),
            role: "employee".to_string(),
            department: "Engineering".to_string(),
            permissions: None,
        })
        .await
        .unwrap();

    // Starting permissions seeded from the assigned role
    assert!(created.permissions.contains(&"dashboard".to_string()));
    assert!(created.permissions.contains(&"team".to_string()));
    assert!(!created.permissions.contains(&"employees".to_string()));

    let listed = client.list_employees().await.unwrap();
    assert_eq!(listed.len(), before + 1);
    assert!(listed.iter().any(|record| record.id == created.id));

    let updated = client
        .update_employee(
            &created.id,
            &tikidan_client::EmployeeUpdate {
                department: Some("Platform".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.department, "Platform");

    client.delete_employee(&created.id).await.unwrap();
    let after = client.list_employees().await.unwrap();
    assert!(!after.iter().any(|record| record.id == created.id));
}

#[tokio::test]
async fn deleting_yourself_is_forbidden() {
    let base_url = spawn_mock().await;
    let client = logged_in_client(&base_url, "admin@tikidan.com", "admin123").await;

    let me = client
        .list_employees()
        .await
        .unwrap()
        .into_iter()
        .find(|record| record.email == "admin@tikidan.com")
        .unwrap();

    let err = client.delete_employee(&me.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn team_members_share_a_department() {
    let base_url = spawn_mock().await;
    let admin = logged_in_client(&base_url, "admin@tikidan.com", "admin123").await;

    admin
        .create_employee(&EmployeeCreate {
            name: "Pia Strand".to_string(),
            email: "pia@tikidan.com".to_string(),
            password: "pia123".to_string(),
            role: "employee".to_string(),
            department: "Engineering".to_string(),
            permissions: None,
        })
        .await
        .unwrap();

    let dev = logged_in_client(&base_url, "dev@tikidan.com", "dev123").await;
    let team = dev.team_members().await.unwrap();
    assert!(team.iter().all(|record| record.department == "Engineering"));
    assert!(team.iter().any(|record| record.email == "pia@tikidan.com"));
    assert!(!team.iter().any(|record| record.email == "dev@tikidan.com"));
}
