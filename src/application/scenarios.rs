use crate::application::assertions::{
    assert_all_end_with, assert_avatars_contain_ids, assert_equals, assert_non_decreasing,
    assert_not_null, assert_same_second, zip_parallel,
};
use crate::application::client::ApiClient;
use crate::application::specification::Specification;
use crate::domain::error::{SuiteError, SuiteResult};
use crate::domain::models::{
    ColorsData, Page, Register, SuccessRegistration, UnSuccessReg, UserData, UserTime,
    UserTimeResponse,
};
use crate::infrastructure::config::SuiteConfig;
use chrono::Utc;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, instrument};

pub const USERS_PAGE: u32 = 2;
pub const EMAIL_DOMAIN: &str = "@reqres.in";

pub const REGISTERED_EMAIL: &str = "eve.holt@reqres.in";
pub const REGISTERED_PASSWORD: &str = "pistol";
pub const REGISTERED_ID: u32 = 4;
pub const REGISTERED_TOKEN: &str = "QpwL5tke4Pnpja7X4";

pub const UNREGISTERED_EMAIL: &str = "sydney@fife";
pub const MISSING_PASSWORD_ERROR: &str = "Missing password";

pub const DELETED_USER_ID: u32 = 2;
pub const UPDATED_USER_ID: u32 = 2;
pub const UPDATED_NAME: &str = "morpheus";
pub const UPDATED_JOB: &str = "zion resident";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    CheckAvatarAndIdUntyped,
    SuccessUserUntyped,
    UnsuccessUserUntyped,
    CheckAvatarAndId,
    CheckEmail,
    SuccessRegistration,
    UnsuccessRegistration,
    SortedYears,
    DeleteUser,
    CheckUpdateTime,
}

impl Scenario {
    pub const ALL: [Scenario; 10] = [
        Scenario::CheckAvatarAndIdUntyped,
        Scenario::SuccessUserUntyped,
        Scenario::UnsuccessUserUntyped,
        Scenario::CheckAvatarAndId,
        Scenario::CheckEmail,
        Scenario::SuccessRegistration,
        Scenario::UnsuccessRegistration,
        Scenario::SortedYears,
        Scenario::DeleteUser,
        Scenario::CheckUpdateTime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::CheckAvatarAndIdUntyped => "check_avatar_and_id_untyped",
            Scenario::SuccessUserUntyped => "success_user_untyped",
            Scenario::UnsuccessUserUntyped => "unsuccess_user_untyped",
            Scenario::CheckAvatarAndId => "check_avatar_and_id",
            Scenario::CheckEmail => "check_email",
            Scenario::SuccessRegistration => "success_registration",
            Scenario::UnsuccessRegistration => "unsuccess_registration",
            Scenario::SortedYears => "sorted_years",
            Scenario::DeleteUser => "delete_user",
            Scenario::CheckUpdateTime => "check_update_time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Client plus configuration; every scenario builds its own specification from it.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    client: ApiClient,
    config: SuiteConfig,
}

impl ScenarioContext {
    pub fn new(config: SuiteConfig) -> SuiteResult<Self> {
        let client = ApiClient::new(&config)?;
        Ok(Self { client, config })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn spec(&self, expected_status: StatusCode) -> Specification {
        Specification::for_config(&self.config, expected_status)
    }

    pub async fn run(&self, scenario: Scenario) -> SuiteResult<()> {
        match scenario {
            Scenario::CheckAvatarAndIdUntyped => check_avatar_and_id_untyped(self).await,
            Scenario::SuccessUserUntyped => success_user_untyped(self).await,
            Scenario::UnsuccessUserUntyped => unsuccess_user_untyped(self).await,
            Scenario::CheckAvatarAndId => check_avatar_and_id(self).await,
            Scenario::CheckEmail => check_email(self).await,
            Scenario::SuccessRegistration => success_registration(self).await.map(|_| ()),
            Scenario::UnsuccessRegistration => unsuccess_registration(self).await.map(|_| ()),
            Scenario::SortedYears => sorted_years(self).await,
            Scenario::DeleteUser => delete_user(self).await,
            Scenario::CheckUpdateTime => check_update_time(self).await.map(|_| ()),
        }
    }
}

fn users_path() -> String {
    format!("api/users?page={}", USERS_PAGE)
}

fn register_body(email: &str, password: &str) -> HashMap<&'static str, String> {
    HashMap::from([("email", email.to_string()), ("password", password.to_string())])
}

#[instrument(skip(ctx))]
pub async fn check_avatar_and_id_untyped(ctx: &ScenarioContext) -> SuiteResult<()> {
    let response = ctx.client.get(&ctx.spec(StatusCode::OK), &users_path()).await?;
    let json = response.json_path()?;

    assert_equals("page", &USERS_PAGE, &json.get_as::<u32>("page")?)?;
    assert_not_null("data.id", &json.get("data.id")?)?;

    let emails: Vec<String> = json.get_list("data.email")?;
    let ids: Vec<u32> = json.get_list("data.id")?;
    let avatars: Vec<String> = json.get_list("data.avatar")?;

    let pairs = zip_parallel("data.id/data.avatar", &ids, &avatars)?;
    assert_avatars_contain_ids(pairs.into_iter().map(|(id, avatar)| (*id, avatar.as_str())))?;
    assert_all_end_with("data.email", emails.iter().map(String::as_str), EMAIL_DOMAIN)?;

    info!(users = ids.len(), "Avatars and emails verified by path");
    Ok(())
}

#[instrument(skip(ctx))]
pub async fn success_user_untyped(ctx: &ScenarioContext) -> SuiteResult<()> {
    let body = register_body(REGISTERED_EMAIL, REGISTERED_PASSWORD);
    let response = ctx.client.post(&ctx.spec(StatusCode::OK), "api/register", &body).await?;
    let json = response.json_path()?;

    assert_equals("id", &REGISTERED_ID, &json.get_as::<u32>("id")?)?;
    assert_equals("token", REGISTERED_TOKEN, json.get_as::<String>("token")?.as_str())?;
    Ok(())
}

#[instrument(skip(ctx))]
pub async fn unsuccess_user_untyped(ctx: &ScenarioContext) -> SuiteResult<()> {
    let body = register_body(UNREGISTERED_EMAIL, "");
    let response = ctx
        .client
        .post(&ctx.spec(StatusCode::BAD_REQUEST), "api/register", &body)
        .await?;
    let json = response.json_path()?;

    assert_equals("error", MISSING_PASSWORD_ERROR, json.get_as::<String>("error")?.as_str())
}

#[instrument(skip(ctx))]
pub async fn check_avatar_and_id(ctx: &ScenarioContext) -> SuiteResult<()> {
    let users = fetch_users(ctx).await?;
    assert_avatars_contain_ids(users.iter().map(|u| (u.id, u.avatar.as_str())))?;
    info!(users = users.len(), "Avatars contain user ids");
    Ok(())
}

#[instrument(skip(ctx))]
pub async fn check_email(ctx: &ScenarioContext) -> SuiteResult<()> {
    let users = fetch_users(ctx).await?;
    assert_all_end_with("email", users.iter().map(|u| u.email.as_str()), EMAIL_DOMAIN)
}

async fn fetch_users(ctx: &ScenarioContext) -> SuiteResult<Vec<UserData>> {
    let response = ctx.client.get(&ctx.spec(StatusCode::OK), &users_path()).await?;
    let page: Page<UserData> = response.extract()?;
    Ok(page.data)
}

#[instrument(skip(ctx))]
pub async fn success_registration(ctx: &ScenarioContext) -> SuiteResult<SuccessRegistration> {
    let user = Register::new(REGISTERED_EMAIL, REGISTERED_PASSWORD);
    let registration: SuccessRegistration = ctx
        .client
        .post(&ctx.spec(StatusCode::OK), "api/register", &user)
        .await?
        .extract()?;

    if registration.token.is_empty() {
        return Err(SuiteError::assertion("token", "non-empty token", &registration.token));
    }
    assert_equals("id", &REGISTERED_ID, &registration.id)?;
    assert_equals("token", REGISTERED_TOKEN, registration.token.as_str())?;
    Ok(registration)
}

#[instrument(skip(ctx))]
pub async fn unsuccess_registration(ctx: &ScenarioContext) -> SuiteResult<UnSuccessReg> {
    let user = Register::new(UNREGISTERED_EMAIL, "");
    let failure: UnSuccessReg = ctx
        .client
        .post(&ctx.spec(StatusCode::BAD_REQUEST), "api/register", &user)
        .await?
        .extract()?;

    assert_equals("error", MISSING_PASSWORD_ERROR, failure.error.as_str())?;
    Ok(failure)
}

#[instrument(skip(ctx))]
pub async fn sorted_years(ctx: &ScenarioContext) -> SuiteResult<()> {
    let colors: Page<ColorsData> = ctx
        .client
        .get(&ctx.spec(StatusCode::OK), "api/unknown")
        .await?
        .extract()?;

    let years: Vec<i32> = colors.data.iter().map(|c| c.year).collect();
    assert_non_decreasing("color years", &years)?;
    info!(colors = years.len(), "Color years are sorted");
    Ok(())
}

#[instrument(skip(ctx))]
pub async fn delete_user(ctx: &ScenarioContext) -> SuiteResult<()> {
    let path = format!("api/delete/{}", DELETED_USER_ID);
    ctx.client.delete(&ctx.spec(StatusCode::NO_CONTENT), &path).await?;
    Ok(())
}

#[instrument(skip(ctx))]
pub async fn check_update_time(ctx: &ScenarioContext) -> SuiteResult<UserTimeResponse> {
    let user = UserTime::new(UPDATED_NAME, UPDATED_JOB);
    let path = format!("api/users/{}", UPDATED_USER_ID);
    let response: UserTimeResponse = ctx
        .client
        .put(&ctx.spec(StatusCode::OK), &path, &user)
        .await?
        .extract()?;
    let now = Utc::now();

    assert_equals("updated user", &user, &response.user)?;
    assert_same_second("updatedAt", now, response.updated_at)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_names_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_name(scenario.name()), Some(scenario));
        }
        assert_eq!(Scenario::from_name("unknown"), None);
    }

    #[test]
    fn test_register_body_holds_both_keys() {
        let body = register_body(UNREGISTERED_EMAIL, "");
        assert_eq!(body.get("email").map(String::as_str), Some("sydney@fife"));
        assert_eq!(body.get("password").map(String::as_str), Some(""));
    }

    #[test]
    fn test_users_path_targets_second_page() {
        assert_eq!(users_path(), "api/users?page=2");
    }
}
