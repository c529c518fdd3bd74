use reqwest::Method;
use serde_json::Value;
use tracing::info;

use kodion::config::Config;
use kodion::favorites::FavoriteList;
use kodion::network::{JsonHook, RequestClient, RequestOptions, Session};

use crate::cli::{FavoritesCommand, FetchArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn fetch(config: &Config, args: FetchArgs) -> Result<(), AnyError> {
    let session = Session::install(config.network.clone())?;
    let client = RequestClient::with_session(session, config);

    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())?;
    let mut options = RequestOptions::new()
        .with_method(method)
        .with_raise_exc(args.raise);

    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("Header '{header}' is not in `Name: value` form"))?;
        options = options.with_header(name.trim(), value.trim());
    }
    for param in &args.params {
        let (name, value) = param
            .split_once('=')
            .ok_or_else(|| format!("Parameter '{param}' is not in `name=value` form"))?;
        options = options.with_param(name, value);
    }
    if let Some(timeout) = args.timeout {
        options = options.with_timeout(timeout.as_duration());
    }
    if args.insecure {
        options = options.with_verify(false);
    }

    let succeeded = if args.json {
        let hook = JsonHook::<Value>::new();
        match client.request_with(&args.url, options, &hook, None).await? {
            Some(body) => {
                println!("{}", serde_json::to_string_pretty(&body)?);
                true
            }
            None => false,
        }
    } else {
        match client.request(&args.url, options).await? {
            Some(response) => {
                let status = response.status();
                let body = response.text().await?;
                info!(%status, bytes = body.len(), "Request completed");
                println!("{body}");
                true
            }
            None => false,
        }
    };

    client.close();

    if succeeded {
        Ok(())
    } else {
        Err(format!("Request to {} failed", args.url).into())
    }
}

pub fn favorites(config: &Config, command: FavoritesCommand) -> Result<(), AnyError> {
    let list = FavoriteList::open(&config.storage.favorites_path)?;

    match command {
        FavoritesCommand::List { json } => {
            for record in list.get_items()? {
                if json {
                    let line = serde_json::json!({
                        "id": record.id,
                        "added_at": record.added_at,
                        "item": record.item,
                    });
                    println!("{line}");
                } else {
                    println!(
                        "{}\t{}\t{}\t{}",
                        record.id,
                        record.item.kind(),
                        record.item.name(),
                        record.added_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        FavoritesCommand::Remove { id } => {
            if list.remove_id(&id)? {
                list.persist()?;
                println!("Removed {id}");
            } else {
                return Err(format!("No favorite with id {id}").into());
            }
        }
        FavoritesCommand::Clear => {
            let removed = list.clear()?;
            list.persist()?;
            println!("Removed {removed} favorites");
        }
    }

    Ok(())
}

pub fn show_config(config: &Config) -> Result<(), AnyError> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
