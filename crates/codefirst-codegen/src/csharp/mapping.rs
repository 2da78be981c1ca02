use super::{class_name, escape, literal, Comma, Formatter, FILE_EXTENSION};
use crate::{Host, Result, Template};
use codefirst_core::schema::app::{
    AssociationType, EntityType, Multiplicity, NavigationProperty, Property,
};
use codefirst_core::Error;

/// An `EntityTypeConfiguration` class binding the entity type to its table.
#[derive(Debug, Default, Clone, Copy)]
pub struct MappingTemplate;

impl Template for MappingTemplate {
    fn file_extension(&self) -> &str {
        FILE_EXTENSION
    }

    fn render(&self, host: &Host<'_>) -> Result<String> {
        let entity_type = host.require_entity_type()?;

        let table = host.table.ok_or_else(|| {
            template_error(format!("no table binding for `{}`", entity_type.name))
        })?;
        let columns = host.property_columns.ok_or_else(|| {
            template_error(format!("no column bindings for `{}`", entity_type.name))
        })?;

        let class = class_name(entity_type.name());

        let mut f = Formatter::new();

        // `DatabaseGeneratedOption` moved in version 5
        if host.framework_version.major() >= 5 {
            fmt!(f, "using System.ComponentModel.DataAnnotations.Schema;");
        } else {
            fmt!(f, "using System.ComponentModel.DataAnnotations;");
        }
        fmt!(f, "using System.Data.Entity.ModelConfiguration;");
        fmt!(f);
        f.open(format_args!("namespace {}", host.namespace));
        f.open(format_args!(
            "public class {class}Map : EntityTypeConfiguration<{class}>"
        ));
        f.open(format_args!("public {class}Map()"));

        fmt!(f, "// Primary Key");
        fmt!(f, "this.HasKey({});", members("t", &entity_type.key));

        let configured: Vec<_> = entity_type
            .properties
            .iter()
            .map(|property| (property, facets(entity_type, property)))
            .filter(|(_, facets)| !facets.is_empty())
            .collect();

        if !configured.is_empty() {
            fmt!(f);
            fmt!(f, "// Properties");
            for (property, facets) in configured {
                fmt!(f, "this.Property(t => t.{})", escape(&property.name));
                f.indent();
                let last = facets.len() - 1;
                for (i, facet) in facets.iter().enumerate() {
                    let end = if i == last { ";" } else { "" };
                    fmt!(f, ".{facet}{end}");
                }
                f.dedent();
                fmt!(f);
            }
        } else {
            fmt!(f);
        }

        fmt!(f, "// Table & Column Mappings");
        match &table.owner {
            Some(owner) => fmt!(f, "this.ToTable({}, {});", literal(&table.name), literal(owner)),
            None => fmt!(f, "this.ToTable({});", literal(&table.name)),
        }

        for property in &entity_type.properties {
            let column = columns.get(&property.name).ok_or_else(|| {
                template_error(format!(
                    "no column for `{}.{}`",
                    entity_type.name, property.name
                ))
            })?;
            fmt!(
                f,
                "this.Property(t => t.{}).HasColumnName({});",
                escape(&property.name),
                literal(&column.name)
            );
        }

        let mut relationships = vec![];
        for nav in &entity_type.navigations {
            if let Some(lines) = relationship(host, nav)? {
                relationships.push(lines);
            }
        }

        if !relationships.is_empty() {
            fmt!(f);
            fmt!(f, "// Relationships");
            for (i, lines) in relationships.iter().enumerate() {
                if i > 0 {
                    fmt!(f);
                }
                let mut lines = lines.iter();
                if let Some(head) = lines.next() {
                    fmt!(f, "{head}");
                }
                f.indent();
                for line in lines {
                    fmt!(f, "{line}");
                }
                f.dedent();
            }
        }

        f.close();
        f.close();
        f.close();

        Ok(f.finish())
    }
}

/// Fluent configuration calls for one property.
fn facets(entity_type: &EntityType, property: &Property) -> Vec<String> {
    let mut facets = vec![];

    let is_key = entity_type.is_key(&property.name);

    if !property.nullable && !property.ty.is_value_type() {
        facets.push("IsRequired()".to_string());
    }

    if let Some(max_length) = property.max_length {
        facets.push(format!("HasMaxLength({max_length})"));
    }

    // A lone integer key is an identity column unless configured otherwise
    if is_key && entity_type.key.len() == 1 && property.ty.is_integer() && !property.store_generated {
        facets.push("HasDatabaseGeneratedOption(DatabaseGeneratedOption.None)".to_string());
    } else if !is_key && property.store_generated {
        facets.push("HasDatabaseGeneratedOption(DatabaseGeneratedOption.Identity)".to_string());
    }

    facets
}

/// Fluent relationship configuration for a navigation, when this side owns
/// it: the dependent side of a foreign-key association, or the first end of
/// a many-to-many association.
fn relationship(host: &Host<'_>, nav: &NavigationProperty) -> Result<Option<Vec<String>>> {
    let association = host.model.get_association(&nav.association).ok_or_else(|| {
        template_error(format!(
            "navigation `{}` refers to unknown association `{}`",
            nav.name, nav.association
        ))
    })?;

    let (Some(from), Some(to)) = (association.end(&nav.from_role), association.end(&nav.to_role))
    else {
        return Err(template_error(format!(
            "navigation `{}` refers to unknown roles of `{}`",
            nav.name, association.name
        )));
    };

    let target = host.model.get_entity_type(&to.entity_type).ok_or_else(|| {
        template_error(format!("unknown entity type `{}`", to.entity_type))
    })?;
    let inverse = inverse_navigation(target, association, nav);

    if association.is_many_to_many() {
        if association.ends[0].role != nav.from_role {
            return Ok(None);
        }

        let join = host.many_to_many.get(&association.name).ok_or_else(|| {
            template_error(format!(
                "no join table mapping for association `{}`",
                association.name
            ))
        })?;

        let keys = |role: &str| -> Result<Vec<String>> {
            let end = join.end(role).ok_or_else(|| {
                template_error(format!(
                    "join table mapping for `{}` has no end `{role}`",
                    association.name
                ))
            })?;
            Ok(end.properties.values().map(|column| literal(&column.name)).collect())
        };
        let left = keys(&nav.from_role)?;
        let right = keys(&nav.to_role)?;

        return Ok(Some(vec![
            format!("this.HasMany(t => t.{})", escape(&nav.name)),
            with("Many", inverse),
            ".Map(m =>".to_string(),
            "    {".to_string(),
            format!("        m.ToTable({});", literal(&join.table.name)),
            format!("        m.MapLeftKey({});", Comma(&left)),
            format!("        m.MapRightKey({});", Comma(&right)),
            "    });".to_string(),
        ]));
    }

    let Some(constraint) = &association.constraint else {
        return Ok(None);
    };

    if constraint.dependent_role != nav.from_role {
        return Ok(None);
    }

    let head = match to.multiplicity {
        Multiplicity::One => "HasRequired",
        Multiplicity::ZeroOrOne => "HasOptional",
        Multiplicity::Many => return Ok(None),
    };

    let mut lines = vec![format!("this.{head}(t => t.{})", escape(&nav.name))];

    match from.multiplicity {
        Multiplicity::Many => {
            lines.push(with("Many", inverse));
            lines.push(format!(
                ".HasForeignKey({});",
                members("d", &constraint.dependent_properties)
            ));
        }
        Multiplicity::ZeroOrOne => lines.push(format!("{};", with("Optional", inverse))),
        Multiplicity::One => lines.push(format!("{};", with("Required", inverse))),
    }

    Ok(Some(lines))
}

/// `.WithMany(t => t.Orders)`, or `.WithMany()` when the far side has no
/// navigation back.
fn with(kind: &str, inverse: Option<&NavigationProperty>) -> String {
    match inverse {
        Some(inverse) => format!(".With{kind}(t => t.{})", escape(&inverse.name)),
        None => format!(".With{kind}()"),
    }
}

fn inverse_navigation<'a>(
    target: &'a EntityType,
    association: &AssociationType,
    nav: &NavigationProperty,
) -> Option<&'a NavigationProperty> {
    target.navigations.iter().find(|candidate| {
        candidate.association == association.name
            && candidate.from_role == nav.to_role
            && candidate.to_role == nav.from_role
    })
}

/// `t => t.Id`, or `t => new { t.A, t.B }` for composite keys.
fn members(param: &str, names: &[String]) -> String {
    let members: Vec<_> = names
        .iter()
        .map(|name| format!("{param}.{}", escape(name)))
        .collect();

    match &members[..] {
        [single] => format!("{param} => {single}"),
        _ => format!("{param} => new {{ {} }}", Comma(&members)),
    }
}

fn template_error(message: String) -> Error {
    Error::template("mapping", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_expressions() {
        assert_eq!(members("t", &["Id".to_string()]), "t => t.Id");
        assert_eq!(
            members("d", &["OrderId".to_string(), "Line".to_string()]),
            "d => new { d.OrderId, d.Line }"
        );
    }
}
