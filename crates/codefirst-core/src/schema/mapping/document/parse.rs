use super::{
    AssociationSetMapping, Dialect, EndProperty, EntitySetMapping, EntityTypeMapping,
    MappingDocument, MappingFragment, ScalarProperty,
};
use crate::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::str::FromStr;

/// Untyped element tree, built before any dialect-specific interpretation.
#[derive(Debug)]
struct Element {
    /// Qualified name as written, e.g. `cs:Mapping`
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl MappingDocument {
    /// Parses a mapping document, detecting its dialect from the root
    /// element's namespace.
    pub fn parse(xml: &str) -> Result<MappingDocument> {
        let root = read_tree(xml)?;

        if root.local_name() != "Mapping" {
            return Err(Error::invalid_mapping_document(format!(
                "expected root element `Mapping`, found `{}`",
                root.name
            )));
        }

        let namespace = root.namespace().ok_or_else(|| {
            Error::invalid_mapping_document("root element `Mapping` declares no namespace")
        })?;
        let dialect = Dialect::from_namespace(namespace).ok_or_else(|| {
            Error::invalid_mapping_document(format!("unsupported namespace `{namespace}`"))
        })?;

        let mut document = MappingDocument::new(dialect);

        // Only the first container mapping is considered
        let Some(container) = root.child("EntityContainerMapping") else {
            return Ok(document);
        };

        document.storage_container = container.attr_string("StorageEntityContainer");
        document.cdm_container = container.attr_string("CdmEntityContainer");

        for element in container.children_named("EntitySetMapping") {
            let set = match dialect {
                Dialect::Flat => flat_entity_set(element),
                Dialect::Nested => nested_entity_set(element),
            };
            document.entity_sets.push(set);
        }

        for element in container.children_named("AssociationSetMapping") {
            document.association_sets.push(association_set(element));
        }

        Ok(document)
    }
}

impl FromStr for MappingDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<MappingDocument> {
        MappingDocument::parse(s)
    }
}

// Missing `Name` attributes are kept as `None`; resolution reports them only
// for the nodes it actually looks up.
fn flat_entity_set(element: &Element) -> EntitySetMapping {
    let fragment = MappingFragment {
        store_entity_set: element.attr_string("StoreEntitySet"),
        scalar_properties: scalar_properties(element),
    };

    EntitySetMapping {
        name: element.attr_string("Name"),
        type_mappings: vec![EntityTypeMapping {
            type_name: element.attr_string("TypeName"),
            fragments: vec![fragment],
        }],
    }
}

fn nested_entity_set(element: &Element) -> EntitySetMapping {
    let type_mappings = element
        .children_named("EntityTypeMapping")
        .map(|type_mapping| EntityTypeMapping {
            type_name: type_mapping.attr_string("TypeName"),
            fragments: type_mapping
                .children_named("MappingFragment")
                .map(|fragment| MappingFragment {
                    store_entity_set: fragment.attr_string("StoreEntitySet"),
                    scalar_properties: scalar_properties(fragment),
                })
                .collect(),
        })
        .collect();

    EntitySetMapping {
        name: element.attr_string("Name"),
        type_mappings,
    }
}

fn association_set(element: &Element) -> AssociationSetMapping {
    AssociationSetMapping {
        name: element.attr_string("Name"),
        type_name: element.attr_string("TypeName"),
        store_entity_set: element.attr_string("StoreEntitySet"),
        end_properties: element
            .children_named("EndProperty")
            .map(|end| EndProperty {
                name: end.attr_string("Name"),
                scalar_properties: scalar_properties(end),
            })
            .collect(),
    }
}

fn scalar_properties(element: &Element) -> Vec<ScalarProperty> {
    element
        .children_named("ScalarProperty")
        .map(|prop| ScalarProperty {
            name: prop.attr_string("Name"),
            column_name: prop.attr_string("ColumnName"),
        })
        .collect()
}

fn read_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = vec![];
    let mut root = None;

    loop {
        let event = reader.read_event().map_err(|err| {
            Error::invalid_mapping_document(format!(
                "malformed XML at byte {}: {err}",
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                close(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml checks that end tags match
                if let Some(element) = stack.pop() {
                    close(&mut stack, &mut root, element)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::invalid_mapping_document(format!(
            "unclosed element `{}`",
            open.name
        )));
    }

    root.ok_or_else(|| Error::invalid_mapping_document("document has no root element"))
}

fn close(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(Error::invalid_mapping_document(
                "document has more than one root element",
            ))
        }
    }
    Ok(())
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let name = utf8(start.name().as_ref())?;
        let mut attributes = vec![];

        for attr in start.attributes() {
            let attr = attr.map_err(|err| {
                Error::invalid_mapping_document(format!("malformed attribute on `{name}`: {err}"))
            })?;
            let value = attr.unescape_value().map_err(|err| {
                Error::invalid_mapping_document(format!("malformed attribute on `{name}`: {err}"))
            })?;
            attributes.push((utf8(attr.key.as_ref())?, value.into_owned()));
        }

        Ok(Element {
            name,
            attributes,
            children: vec![],
        })
    }

    fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Namespace bound to this element's prefix, when declared on the element.
    fn namespace(&self) -> Option<&str> {
        match self.prefix() {
            Some(prefix) => self.attr(&format!("xmlns:{prefix}")),
            None => self.attr("xmlns"),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn attr_string(&self, name: &str) -> Option<String> {
        self.attr(name).map(str::to_string)
    }

    fn child(&self, local_name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.local_name() == local_name)
    }

    fn children_named<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.local_name() == local_name)
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| Error::invalid_mapping_document(format!("invalid UTF-8 in name: {err}")))
}
