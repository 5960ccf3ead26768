//! List site content

use anyhow::Result;

use crate::content::{ContentLoader, Section};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);

    match content_type {
        "blog" => {
            let nodes = loader.load_section(Section::Blog)?;
            println!("Blog posts ({}):", nodes.len());
            for node in nodes {
                println!(
                    "  {} - {} [{}]",
                    node.date.format("%Y-%m-%d"),
                    node.title,
                    node.source
                );
            }
        }
        "projects" => {
            let nodes = loader.load_section(Section::Projects)?;
            println!("Projects ({}):", nodes.len());
            for node in nodes {
                println!(
                    "  {} - {} [{}]",
                    node.date.format("%Y-%m-%d"),
                    node.title,
                    node.source
                );
            }
        }
        "route" | "routes" => {
            let nodes = loader.load_all()?;
            println!("Routes ({}):", nodes.len() + 4);
            println!("  /");
            println!("  /blog/");
            println!("  /projects/");
            for node in &nodes {
                println!("  {}", node.path);
            }
            println!("  /404.html");
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: blog, projects, route",
                content_type
            );
        }
    }

    Ok(())
}
