//! renderコマンド - マニフェストの表示・書き出し
//!
//! エンジンには一切触れずに、生成されるマニフェストだけを確認できます。
//! 検証（ポート重複・依存不整合・シークレット不足）はここでも走ります。

use colored::Colorize;
use minato_core::{manifest, Profile, StackOptions};
use std::path::PathBuf;

pub fn handle(
    profile: Profile,
    opts: StackOptions,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let stack = profile.stack(&opts)?;

    match output {
        Some(path) => {
            manifest::write_manifest(&stack, &path)?;
            println!(
                "{} マニフェストを書き出しました: {}",
                "✓".green().bold(),
                path.display()
            );
        }
        None => {
            let rendered = manifest::render(&stack)?;
            print!("{}", rendered);
        }
    }

    Ok(())
}
