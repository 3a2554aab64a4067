/// 계정 관련 커맨드 처리
/// 1. 회원 가입
/// 2. 로그인 / 로그아웃
/// 3. 프로필 수정
// region:    --- Imports
use crate::bidding::model::User;
use crate::error::MarketError;
use crate::state::Marketplace;
use crate::store::USERS_KEY;
use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub mod validation;

use self::validation::{format_cpf, validate_cpf, validate_email};
// endregion: --- Imports

// region:    --- Commands
/// 회원 가입 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub password: String,
    pub confirm_password: String,
}

/// 로그인 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// 프로필 수정 명령
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateProfileCommand {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

fn placeholder_avatar(name: &str) -> String {
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_default();
    format!("https://placehold.co/128x128/3d6bf4/FFF?text={}", initial)
}

/// 1. 회원 가입. 가입 후 자동 로그인은 하지 않는다.
pub fn register(
    cmd: RegisterCommand,
    market: &mut Marketplace,
    now: DateTime<Utc>,
) -> Result<User, MarketError> {
    info!("{:<12} --> 회원 가입 요청: {}", "Account", cmd.email);

    if !validate_email(&cmd.email) {
        return Err(MarketError::InvalidEmail);
    }
    if !validate_cpf(&cmd.cpf) {
        return Err(MarketError::InvalidCpf);
    }
    if cmd.password != cmd.confirm_password {
        return Err(MarketError::PasswordMismatch);
    }

    let mut users: Vec<User> = market.store.get_data(USERS_KEY, Vec::new());
    if users.iter().any(|user| user.email == cmd.email) {
        warn!("{:<12} --> 중복 이메일: {}", "Account", cmd.email);
        return Err(MarketError::EmailTaken);
    }

    let mut id = now.timestamp_millis();
    if users.iter().any(|user| user.id == id) {
        id = users.iter().map(|user| user.id).max().unwrap_or(id) + 1;
    }

    let user = User {
        id,
        avatar: placeholder_avatar(&cmd.name),
        name: cmd.name,
        email: cmd.email,
        password: cmd.password,
        cpf: format_cpf(&cmd.cpf),
        member_since: now.with_timezone(&Local).year(),
    };
    users.push(user.clone());
    market.store.set_data(USERS_KEY, &users)?;

    info!("{:<12} --> 회원 가입 성공: id={}", "Account", user.id);
    Ok(user)
}

/// 2. 로그인
pub fn login(cmd: LoginCommand, market: &mut Marketplace) -> Result<User, MarketError> {
    info!("{:<12} --> 로그인 요청: {}", "Account", cmd.email);

    let users: Vec<User> = market.store.get_data(USERS_KEY, Vec::new());
    let user = users
        .into_iter()
        .find(|user| user.email == cmd.email && user.password == cmd.password)
        .ok_or(MarketError::InvalidCredentials)?;

    market.session.set(&market.store, Some(user.clone()))?;
    Ok(user)
}

/// 2. 로그아웃
pub fn logout(market: &mut Marketplace) -> Result<(), MarketError> {
    info!("{:<12} --> 로그아웃", "Account");
    market.session.set(&market.store, None)?;
    Ok(())
}

/// 3. 프로필 수정. 기존 경매의 판매자 정보는 바뀌지 않는다.
pub fn update_profile(
    cmd: UpdateProfileCommand,
    market: &mut Marketplace,
) -> Result<User, MarketError> {
    let mut updated = market.session.require()?.clone();
    info!("{:<12} --> 프로필 수정: id={}", "Account", updated.id);

    if let Some(name) = cmd.name {
        updated.name = name;
    }
    if let Some(avatar) = cmd.avatar {
        updated.avatar = avatar;
    }

    let users: Vec<User> = market
        .store
        .get_data::<Vec<User>>(USERS_KEY, Vec::new())
        .into_iter()
        .map(|user| {
            if user.id == updated.id {
                updated.clone()
            } else {
                user
            }
        })
        .collect();
    market.store.set_data(USERS_KEY, &users)?;
    market.session.set(&market.store, Some(updated.clone()))?;

    Ok(updated)
}
// endregion: --- Commands
