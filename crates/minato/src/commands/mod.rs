pub mod down;
pub mod ps;
pub mod render;
pub mod up;

use minato_core::Profile;

/// プロファイル名を決定する（位置引数・フラグ・デフォルトの順）
pub fn determine_profile(
    positional: Option<String>,
    flag: Option<String>,
) -> anyhow::Result<Profile> {
    let name = positional.or(flag).unwrap_or_else(|| "chat".to_string());
    Ok(name.parse::<Profile>()?)
}
