use crate::error::SchedError;
use crate::model::{Account, Board, Role, UserId};

/// Crée un compte ; le rôle est normalisé (espaces, casse).
pub fn create_user(board: &mut Board, username: &str, role: &str) -> Result<UserId, SchedError> {
    let role: Role = role.parse()?;
    add_account(board, Account::new(username.trim(), role))
}

/// Ajoute un compte déjà construit (import CSV...) en vérifiant l'unicité.
pub fn add_account(board: &mut Board, account: Account) -> Result<UserId, SchedError> {
    check_username(board, &account.username)?;
    log_event!(info, username = %account.username, role = %account.role, "account created");
    let id = account.id.clone();
    board.accounts.push(account);
    Ok(id)
}

/// Comptes dans l'ordre d'insertion.
pub fn list_users(board: &Board) -> Vec<&Account> {
    board.accounts.iter().collect()
}

/// Renomme un compte ; mêmes règles que la création (non vide, unique).
pub fn rename_user(board: &mut Board, id: &UserId, new_name: &str) -> Result<(), SchedError> {
    let new_name = new_name.trim();
    let current = get_user(board, id)?;
    if current.username == new_name {
        return Ok(());
    }
    check_username(board, new_name)?;
    let account = board
        .accounts
        .iter_mut()
        .find(|a| &a.id == id)
        .ok_or_else(|| SchedError::not_found("user", id.as_str()))?;
    log_event!(info, from = %account.username, to = %new_name, "account renamed");
    account.username = new_name.to_string();
    Ok(())
}

fn check_username(board: &Board, username: &str) -> Result<(), SchedError> {
    if username.trim().is_empty() {
        return Err(SchedError::InvalidArgument(
            "username cannot be empty".to_string(),
        ));
    }
    if board.find_account_by_username(username).is_some() {
        return Err(SchedError::InvalidArgument(format!(
            "username already taken: {username}"
        )));
    }
    Ok(())
}

pub fn get_user<'a>(board: &'a Board, id: &UserId) -> Result<&'a Account, SchedError> {
    board
        .find_account(id)
        .ok_or_else(|| SchedError::not_found("user", id.as_str()))
}

pub(crate) fn require_role<'a>(
    board: &'a Board,
    id: &UserId,
    role: Role,
    action: &str,
) -> Result<&'a Account, SchedError> {
    match board.find_account(id) {
        Some(account) if account.role == role => Ok(account),
        _ => Err(SchedError::PermissionDenied(format!(
            "only {role} accounts can {action}"
        ))),
    }
}
