use super::{class_name, escape, type_name, Formatter, FILE_EXTENSION};
use crate::{Host, Result, Template};
use codefirst_core::schema::app::NavigationProperty;
use codefirst_core::Error;

/// A plain entity class: scalar properties, then navigation properties.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityTemplate;

impl Template for EntityTemplate {
    fn file_extension(&self) -> &str {
        FILE_EXTENSION
    }

    fn render(&self, host: &Host<'_>) -> Result<String> {
        let entity_type = host.require_entity_type()?;
        let class = class_name(entity_type.name());

        // Resolve every navigation up front so a dangling reference fails
        // before anything is written
        let mut navigations = vec![];
        for nav in &entity_type.navigations {
            navigations.push((nav, Navigation::resolve(host, nav)?));
        }

        let mut f = Formatter::new();

        fmt!(f, "using System;");
        fmt!(f, "using System.Collections.Generic;");
        fmt!(f);
        f.open(format_args!("namespace {}", host.namespace));
        f.open(format_args!("public partial class {class}"));

        let collections: Vec<_> = navigations
            .iter()
            .filter(|(_, target)| target.is_collection)
            .collect();

        if !collections.is_empty() {
            f.open(format_args!("public {class}()"));
            for (nav, target) in &collections {
                fmt!(
                    f,
                    "this.{} = new List<{}>();",
                    escape(&nav.name),
                    target.class
                );
            }
            f.close();
            fmt!(f);
        }

        for property in &entity_type.properties {
            fmt!(
                f,
                "public {} {} {{ get; set; }}",
                type_name(property),
                escape(&property.name)
            );
        }

        for (nav, target) in &navigations {
            if target.is_collection {
                fmt!(
                    f,
                    "public virtual ICollection<{}> {} {{ get; set; }}",
                    target.class,
                    escape(&nav.name)
                );
            } else {
                fmt!(
                    f,
                    "public virtual {} {} {{ get; set; }}",
                    target.class,
                    escape(&nav.name)
                );
            }
        }

        f.close();
        f.close();

        Ok(f.finish())
    }
}

/// The far side of a navigation property.
struct Navigation {
    class: String,
    is_collection: bool,
}

impl Navigation {
    fn resolve(host: &Host<'_>, nav: &NavigationProperty) -> Result<Navigation> {
        let end = host
            .model
            .get_association(&nav.association)
            .and_then(|association| association.end(&nav.to_role))
            .ok_or_else(|| {
                Error::template(
                    "entity",
                    format!(
                        "navigation `{}` refers to unknown end `{}` of `{}`",
                        nav.name, nav.to_role, nav.association
                    ),
                )
            })?;

        Ok(Navigation {
            class: class_name(end.entity_type.name()),
            is_collection: end.multiplicity.is_many(),
        })
    }
}
