use anyhow::Result;
use clap::Parser;
use kirana::cli::{Args, Commands};
use kirana::commands;
use kirana::config::Config;
use kirana::logger;

fn main() {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    if let Err(e) = run(args) {
        kirana::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Login { password } => {
            let config = Config::load(args.config.as_ref())?;
            commands::login(&config, &password)?;
        }
        Commands::Logout => {
            commands::logout()?;
        }
        Commands::Add {
            name,
            price,
            category,
            badge,
            image,
            image_url,
        } => {
            let config = Config::load(args.config.as_ref())?;
            commands::add(&config, &name, price, category, badge, image, image_url)?;
        }
        Commands::List { search } => {
            let config = Config::load(args.config.as_ref())?;
            commands::list(&config, search)?;
        }
        Commands::Edit {
            id,
            name,
            price,
            category,
            badge,
            image,
            image_url,
        } => {
            let config = Config::load(args.config.as_ref())?;
            commands::edit(&config, &id, name, price, category, badge, image, image_url)?;
        }
        Commands::Remove { id } => {
            let config = Config::load(args.config.as_ref())?;
            commands::remove(&config, &id)?;
        }
        Commands::Toggle { id } => {
            let config = Config::load(args.config.as_ref())?;
            commands::toggle(&config, &id)?;
        }
        Commands::Catalog {
            search,
            category,
            stock,
        } => {
            // Storefront works without a config; it falls back to demo data.
            let config = Config::load(args.config.as_ref()).ok();
            commands::catalog(config.as_ref(), search, category, stock)?;
        }
        Commands::Compress {
            input,
            output,
            target_kb,
            max_width,
            quality,
            step,
            min_quality,
        } => {
            commands::compress_file(
                &input,
                &output,
                target_kb,
                max_width,
                quality,
                step,
                min_quality,
            )?;
        }
    }

    Ok(())
}
