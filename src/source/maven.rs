//! Remote Maven repository source.
//!
//! Packages are identified by `group:artifact:version` coordinates. The
//! source fetches `{base}/{group as path}/{artifact}/{version}/
//! {artifact}-{version}.pom` and extracts the declared `<dependency>`
//! coordinates from the manifest's top-level `<dependencies>` block.
//!
//! No package-manager semantics are applied: version ranges, scopes,
//! profiles, and `dependencyManagement` overrides are all recorded or
//! skipped verbatim, never resolved.

use std::collections::HashMap;
use std::time::Duration;

use super::{GraphSource, SourceError, SourceResult};
use crate::graph::PackageId;

/// A `group:artifact:version` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Coordinate {
    group: String,
    artifact: String,
    version: String,
}

impl Coordinate {
    /// Parses a coordinate id. Returns `None` unless all three segments are
    /// present and non-empty.
    fn parse(id: &str) -> Option<Self> {
        let mut parts = id.split(':');
        let group = parts.next()?.trim();
        let artifact = parts.next()?.trim();
        let version = parts.next()?.trim();
        if parts.next().is_some() || group.is_empty() || artifact.is_empty() || version.is_empty()
        {
            return None;
        }
        Some(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
        })
    }
}

/// A [`GraphSource`] backed by a remote Maven repository.
///
/// Fetched manifests are memoized per coordinate, so shared dependencies are
/// downloaded once per session.
pub struct MavenSource {
    base_url: String,
    agent: ureq::Agent,
    cache: HashMap<PackageId, Vec<PackageId>>,
}

impl MavenSource {
    /// Creates a source for the repository at `base_url`
    /// (e.g. `https://repo1.maven.org/maven2`).
    pub fn new(base_url: impl Into<String>) -> Self {
        tracing::info!(
            "remote mode records declared <dependencies> edges as-is; \
             version ranges, scopes and dependencyManagement are not resolved"
        );
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
            cache: HashMap::new(),
        }
    }

    fn pom_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}/{}/{}/{}/{}-{}.pom",
            self.base_url,
            coordinate.group.replace('.', "/"),
            coordinate.artifact,
            coordinate.version,
            coordinate.artifact,
            coordinate.version
        )
    }
}

impl GraphSource for MavenSource {
    fn direct_dependencies_of(&mut self, id: &str) -> SourceResult<Vec<PackageId>> {
        if let Some(cached) = self.cache.get(id) {
            return Ok(cached.clone());
        }

        let Some(coordinate) = Coordinate::parse(id) else {
            tracing::warn!(
                package = id,
                "not a group:artifact:version coordinate; treating as leaf"
            );
            return Ok(Vec::new());
        };

        let url = self.pom_url(&coordinate);
        tracing::debug!(%url, "fetching manifest");

        let dependencies = match self.agent.get(&url).call() {
            Ok(response) => {
                let body = response.into_string().map_err(|err| SourceError::FetchFailed {
                    url: url.clone(),
                    message: err.to_string(),
                })?;
                parse_pom(&body, &url)?
            }
            Err(ureq::Error::Status(404, _)) => {
                tracing::warn!(package = id, "manifest not found in repository; treating as leaf");
                Vec::new()
            }
            Err(err) => {
                return Err(SourceError::FetchFailed {
                    url,
                    message: err.to_string(),
                })
            }
        };

        self.cache.insert(id.to_string(), dependencies.clone());
        Ok(dependencies)
    }
}

/// Extracts dependency coordinates from POM XML.
///
/// Only the manifest's own top-level `<dependencies>` element is read;
/// `<dependencyManagement>` declares constraints, not edges. Dependencies
/// without a literal version (managed or `${property}` interpolated) cannot
/// be fetched further and are skipped with a warning.
fn parse_pom(text: &str, url: &str) -> SourceResult<Vec<PackageId>> {
    let document = roxmltree::Document::parse(text).map_err(|err| SourceError::InvalidManifest {
        url: url.to_string(),
        message: err.to_string(),
    })?;

    let mut dependencies = Vec::new();
    // Tag names are compared namespace-agnostically: POMs in the wild come
    // both with and without the default POM namespace declaration.
    let Some(block) = document
        .root_element()
        .children()
        .find(|node| node.is_element() && node.tag_name().name() == "dependencies")
    else {
        return Ok(dependencies);
    };

    for dependency in block
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "dependency")
    {
        let group = element_text(dependency, "groupId");
        let artifact = element_text(dependency, "artifactId");
        let (Some(group), Some(artifact)) = (group, artifact) else {
            tracing::warn!(%url, "skipping dependency without groupId/artifactId");
            continue;
        };

        let label = format!("{}:{}", group, artifact);
        match element_text(dependency, "version") {
            Some(version) if !version.contains("${") => {
                dependencies.push(format!("{}:{}", label, version));
            }
            Some(version) => {
                tracing::warn!(
                    dependency = %label,
                    version = %version,
                    "skipping dependency with unresolved version property"
                );
            }
            None => {
                tracing::warn!(
                    dependency = %label,
                    "skipping dependency with managed (absent) version"
                );
            }
        }
    }

    Ok(dependencies)
}

/// Returns the trimmed text of the named child element, if present and
/// non-empty.
fn element_text(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>demo-app</artifactId>
    <version>2.1.0</version>
    <dependencies>
        <dependency>
            <groupId>org.slf4j</groupId>
            <artifactId>slf4j-api</artifactId>
            <version>2.0.13</version>
        </dependency>
        <dependency>
            <groupId>com.google.guava</groupId>
            <artifactId>guava</artifactId>
            <version>33.2.0-jre</version>
            <scope>compile</scope>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn test_coordinate_parse() {
        let coordinate = Coordinate::parse("com.example:demo-app:2.1.0").unwrap();
        assert_eq!(coordinate.group, "com.example");
        assert_eq!(coordinate.artifact, "demo-app");
        assert_eq!(coordinate.version, "2.1.0");
    }

    #[test]
    fn test_coordinate_parse_rejects_malformed() {
        assert!(Coordinate::parse("demo-app").is_none());
        assert!(Coordinate::parse("com.example:demo-app").is_none());
        assert!(Coordinate::parse("com.example:demo-app:1.0:extra").is_none());
        assert!(Coordinate::parse("com.example::1.0").is_none());
    }

    #[test]
    fn test_pom_url_layout() {
        let source = MavenSource::new("https://repo1.maven.org/maven2/");
        let coordinate = Coordinate::parse("com.example:demo-app:2.1.0").unwrap();

        assert_eq!(
            source.pom_url(&coordinate),
            "https://repo1.maven.org/maven2/com/example/demo-app/2.1.0/demo-app-2.1.0.pom"
        );
    }

    #[test]
    fn test_parse_pom_extracts_coordinates() {
        let dependencies = parse_pom(SAMPLE_POM, "test").unwrap();

        assert_eq!(
            dependencies,
            vec![
                "org.slf4j:slf4j-api:2.0.13",
                "com.google.guava:guava:33.2.0-jre"
            ]
        );
    }

    #[test]
    fn test_parse_pom_without_namespace() {
        let pom = "<project><dependencies><dependency>\
                   <groupId>a</groupId><artifactId>b</artifactId><version>1</version>\
                   </dependency></dependencies></project>";

        assert_eq!(parse_pom(pom, "test").unwrap(), vec!["a:b:1"]);
    }

    #[test]
    fn test_parse_pom_no_dependencies_block() {
        let pom = "<project><artifactId>leaf</artifactId></project>";
        assert!(parse_pom(pom, "test").unwrap().is_empty());
    }

    #[test]
    fn test_parse_pom_skips_managed_and_property_versions() {
        let pom = r#"<project>
            <dependencies>
                <dependency>
                    <groupId>a</groupId>
                    <artifactId>managed</artifactId>
                </dependency>
                <dependency>
                    <groupId>a</groupId>
                    <artifactId>interpolated</artifactId>
                    <version>${project.version}</version>
                </dependency>
                <dependency>
                    <groupId>a</groupId>
                    <artifactId>pinned</artifactId>
                    <version>1.2.3</version>
                </dependency>
            </dependencies>
        </project>"#;

        assert_eq!(parse_pom(pom, "test").unwrap(), vec!["a:pinned:1.2.3"]);
    }

    #[test]
    fn test_parse_pom_ignores_dependency_management() {
        let pom = r#"<project>
            <dependencyManagement>
                <dependencies>
                    <dependency>
                        <groupId>a</groupId>
                        <artifactId>constrained</artifactId>
                        <version>9.9.9</version>
                    </dependency>
                </dependencies>
            </dependencyManagement>
        </project>"#;

        assert!(parse_pom(pom, "test").unwrap().is_empty());
    }

    #[test]
    fn test_parse_pom_invalid_xml() {
        let result = parse_pom("<project><dependencies>", "test");
        assert!(matches!(
            result.unwrap_err(),
            SourceError::InvalidManifest { .. }
        ));
    }

    #[test]
    fn test_malformed_id_is_leaf_not_error() {
        let mut source = MavenSource::new("https://repo.invalid");
        // Never touches the network: the id fails coordinate parsing first.
        assert!(source.direct_dependencies_of("not-a-coordinate").unwrap().is_empty());
    }
}
