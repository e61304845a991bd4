use medislink_client::{ClientConfig, MedisClient, MedisClientError};
use medislink_core::{AdPayload, AdminApi, UserApi};

fn admin_client() -> MedisClient {
    let config = ClientConfig::from_env().expect("client config must be valid");
    let mut client = MedisClient::new(&config).expect("client must build");
    let token = std::env::var("MEDISLINK_TOKEN").expect("MEDISLINK_TOKEN must be set");
    client.set_token(token);
    client
}

#[tokio::test]
#[ignore = "requires running backend and admin token"]
async fn http_smoke_flow() {
    let client = admin_client();

    let profile = client
        .current_profile()
        .await
        .expect("current_profile must succeed");
    assert!(profile.is_admin());

    let tools = client.list_tools().await.expect("list_tools must succeed");
    if let Some(first) = tools.first() {
        let fetched = client.get_tool(first.id).await.expect("get_tool must succeed");
        assert_eq!(fetched.id, first.id);
    }

    client.list_loans().await.expect("list_loans must succeed");
    client
        .list_donations()
        .await
        .expect("list_donations must succeed");

    let title = format!("smoke ad {}", std::process::id());
    client
        .create_ad(&AdPayload {
            title: title.clone(),
            description: "smoke".to_string(),
            image_url: "https://example.com/banner.png".to_string(),
            link: String::new(),
        })
        .await
        .expect("create_ad must succeed");

    let ads = client.list_ads().await.expect("list_ads must succeed");
    let created = ads
        .iter()
        .find(|ad| ad.title == title)
        .expect("created ad must be listed");
    client
        .delete_ad(created.id)
        .await
        .expect("delete_ad must succeed");
}

#[tokio::test]
#[ignore = "requires running backend"]
async fn unknown_tool_is_not_found() {
    let config = ClientConfig::from_env().expect("client config must be valid");
    let client = MedisClient::new(&config).expect("client must build");

    let missing = client.get_tool(i64::MAX).await;
    assert!(matches!(missing, Err(MedisClientError::NotFound)));
}
