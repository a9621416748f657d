// src/checker/files.rs
// Existence checks for files the documentation depends on (doc pages, demo
// components, backend examples). A file passes when it exists under at least
// one of its group's roots.

use std::path::Path;

use crate::config::RequiredFiles;
use crate::facts::{CheckResult, ClassifiedFact, ExtractedFact, FactCategory};

pub fn check_required(group: &RequiredFiles, site_root: &Path) -> Vec<CheckResult> {
    group
        .files
        .iter()
        .map(|file| {
            let candidates: Vec<_> = group.roots.iter().map(|root| site_root.join(root).join(file)).collect();
            let found = candidates.iter().find(|path| path.exists());
            let location = found.or(candidates.first()).cloned().unwrap_or_else(|| site_root.join(file));
            let fact = ClassifiedFact::new(ExtractedFact::new(file.as_str(), location, 1), FactCategory::RequiredFile)
                .with_sub_category(group.name.as_str());

            match found {
                Some(_) => CheckResult::ok(fact, format!("{} exists: {file}", capitalize(&group.name))),
                None => CheckResult::error(fact, format!("Referenced {} does not exist: {file}", group.name)),
            }
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Status;
    use std::fs;

    #[test]
    fn test_any_root_satisfies_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("core/use_cases")).unwrap();
        fs::write(dir.path().join("core/use_cases/07_agent_eval.py"), "").unwrap();

        let group = RequiredFiles {
            name: "backend example".to_string(),
            roots: vec!["core/examples".to_string(), "core/use_cases".to_string()],
            files: vec!["07_agent_eval.py".to_string(), "01_basic.py".to_string()],
        };
        let results = check_required(&group, dir.path());

        assert_eq!(results[0].status, Status::Ok);
        assert_eq!(results[0].detail, "Backend example exists: 07_agent_eval.py");
        assert_eq!(results[1].status, Status::Error);
        assert_eq!(results[1].detail, "Referenced backend example does not exist: 01_basic.py");
        assert_eq!(results[1].fact.sub_category.as_deref(), Some("backend example"));
    }
}
