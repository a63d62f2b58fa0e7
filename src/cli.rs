//! Command-line arguments for the terminal runner.

use anyhow::{anyhow, Result};

use crate::report::{LeadForm, User};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Validated player, when both `--name` and `--phone` were given.
    pub user: Option<User>,
    /// Deck seed override (takes precedence over `MEMORY_SEED`).
    pub seed: Option<u64>,
}

pub fn parse_args(args: &[String]) -> Result<LaunchOptions> {
    let mut name: Option<String> = None;
    let mut phone: Option<String> = None;
    let mut seed: Option<u64> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--name" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --name"))?;
                name = Some(v.clone());
            }
            "--phone" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --phone"))?;
                phone = Some(v.clone());
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    let user = match (name, phone) {
        (None, None) => None,
        (Some(name), Some(phone)) => {
            let user = LeadForm::new(name, phone).validate().map_err(|errors| {
                let text: Vec<String> = errors.iter().map(ToString::to_string).collect();
                anyhow!("invalid player details: {}", text.join("; "))
            })?;
            Some(user)
        }
        (Some(_), None) => return Err(anyhow!("--name requires --phone")),
        (None, Some(_)) => return Err(anyhow!("--phone requires --name")),
    };

    Ok(LaunchOptions { user, seed })
}
