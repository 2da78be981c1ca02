use super::{Dialect, MappingDocument, MappingFragment, ScalarProperty};
use crate::{err, Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

impl MappingDocument {
    /// Serializes the document in its dialect.
    pub fn to_xml(&self) -> Result<String> {
        let mut f = Formatter {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        };

        f.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        f.start(
            "Mapping",
            &[("Space", Some("C-S")), ("xmlns", Some(self.dialect.namespace()))],
        )?;
        f.start(
            "EntityContainerMapping",
            &[
                ("StorageEntityContainer", self.storage_container.as_deref()),
                ("CdmEntityContainer", self.cdm_container.as_deref()),
            ],
        )?;

        for set in &self.entity_sets {
            let type_mapping = set.type_mappings.first();
            let type_name = type_mapping.and_then(|mapping| mapping.type_name.as_deref());

            match self.dialect {
                Dialect::Flat => {
                    // The flat dialect holds a single fragment per set
                    let fragment = set.fragment();
                    f.start(
                        "EntitySetMapping",
                        &[
                            ("Name", set.name.as_deref()),
                            (
                                "StoreEntitySet",
                                fragment.and_then(|fragment| fragment.store_entity_set.as_deref()),
                            ),
                            ("TypeName", type_name),
                        ],
                    )?;
                    if let Some(fragment) = fragment {
                        f.scalar_properties(&fragment.scalar_properties)?;
                    }
                    f.end("EntitySetMapping")?;
                }
                Dialect::Nested => {
                    f.start("EntitySetMapping", &[("Name", set.name.as_deref())])?;
                    for type_mapping in &set.type_mappings {
                        f.start(
                            "EntityTypeMapping",
                            &[("TypeName", type_mapping.type_name.as_deref())],
                        )?;
                        for fragment in &type_mapping.fragments {
                            f.fragment(fragment)?;
                        }
                        f.end("EntityTypeMapping")?;
                    }
                    f.end("EntitySetMapping")?;
                }
            }
        }

        for set in &self.association_sets {
            f.start(
                "AssociationSetMapping",
                &[
                    ("Name", set.name.as_deref()),
                    ("TypeName", set.type_name.as_deref()),
                    ("StoreEntitySet", set.store_entity_set.as_deref()),
                ],
            )?;
            for end in &set.end_properties {
                f.start("EndProperty", &[("Name", end.name.as_deref())])?;
                f.scalar_properties(&end.scalar_properties)?;
                f.end("EndProperty")?;
            }
            f.end("AssociationSetMapping")?;
        }

        f.end("EntityContainerMapping")?;
        f.end("Mapping")?;

        String::from_utf8(f.writer.into_inner()).map_err(write_failed)
    }
}

struct Formatter {
    writer: Writer<Vec<u8>>,
}

impl Formatter {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(write_failed)
    }

    fn start(&mut self, name: &str, attrs: &[(&str, Option<&str>)]) -> Result<()> {
        self.event(Event::Start(element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, Option<&str>)]) -> Result<()> {
        self.event(Event::Empty(element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn fragment(&mut self, fragment: &MappingFragment) -> Result<()> {
        self.start(
            "MappingFragment",
            &[("StoreEntitySet", fragment.store_entity_set.as_deref())],
        )?;
        self.scalar_properties(&fragment.scalar_properties)?;
        self.end("MappingFragment")
    }

    fn scalar_properties(&mut self, props: &[ScalarProperty]) -> Result<()> {
        for prop in props {
            self.empty(
                "ScalarProperty",
                &[
                    ("Name", prop.name.as_deref()),
                    ("ColumnName", prop.column_name.as_deref()),
                ],
            )?;
        }
        Ok(())
    }
}

/// Absent attributes are omitted.
fn element<'a>(name: &'a str, attrs: &[(&str, Option<&str>)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        if let Some(value) = value {
            start.push_attribute((*key, *value));
        }
    }
    start
}

fn write_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    err!("failed to write mapping document: {err}")
}
