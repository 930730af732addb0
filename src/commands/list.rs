//! List site content

use anyhow::Result;

use crate::content::ContentRegistry;
use crate::pages::Route;
use crate::Folio;

/// Print site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    for line in lines(folio, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// The listing for a content type, one output line per entry
pub fn lines(folio: &Folio, content_type: &str) -> Result<Vec<String>> {
    let content = &folio.content;
    let lines = match content_type {
        "post" | "posts" => records("Posts", &content.blog),
        "project" | "projects" => records("Projects", &content.projects),
        "route" | "routes" => {
            let routes = Route::all(content);
            let mut lines = vec![format!("Routes ({}):", routes.len())];
            lines.extend(routes.iter().map(|r| format!("  {}", r.path())));
            lines
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, project, route",
                content_type
            );
        }
    };
    Ok(lines)
}

fn records(heading: &str, registry: &ContentRegistry) -> Vec<String> {
    let mut lines = vec![format!("{} ({}):", heading, registry.len())];
    lines.extend(registry.iter().map(|r| {
        let marker = if r.featured { " *" } else { "" };
        if r.date.is_empty() {
            format!("  {} [{}]{}", r.title, r.id, marker)
        } else {
            format!("  {} - {} [{}]{}", r.date, r.title, r.id, marker)
        }
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folio() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_list_posts() {
        let (_dir, folio) = folio();
        let lines = lines(&folio, "post").unwrap();
        assert_eq!(lines[0], "Posts (5):");
        assert!(lines[1].starts_with("  Dec 1, 2024 - "));
        assert!(lines[1].ends_with("[tech-shapes-ma-deals] *"));
        assert!(lines[2].ends_with("[ai-product-strategy] *"));
        assert!(lines[5].ends_with("[cloud-resume-learnings]"));
    }

    #[test]
    fn test_list_routes() {
        let (_dir, folio) = folio();
        let lines = lines(&folio, "routes").unwrap();
        assert_eq!(lines[0], format!("Routes ({}):", lines.len() - 1));
        assert_eq!(lines[1], "  /");
        assert!(lines.contains(&"  /projects/asos-recommender/".to_string()));
        assert!(!lines.contains(&"  /blog/tech-shapes-ma-deals/".to_string()));
    }

    #[test]
    fn test_list_unknown_type() {
        let (_dir, folio) = folio();
        assert!(lines(&folio, "tag").is_err());
    }
}
