//! Tests for CityGML writing

mod common;

use citygml::{
    Address, AttributeValue, CityGmlWriter, CityModel, CityObject, CityObjectType, Envelope,
    ExternalObject, ExternalReference, Geometry, GeometryType, Material, MaterialTargetDefinition,
    Texture, TextureCoordinates, TextureTargetDefinition, Vec2, Vec3, WriterConfig,
};
use common::{building_model, parse, single_polygon_geometry};
use std::sync::Arc;

fn encode(model: &CityModel, config: WriterConfig) -> String {
    let mut writer = CityGmlWriter::new(config);
    writer.encode(model).expect("encode failed");
    writer.to_xml_string().expect("render failed")
}

/// One LOD2 building with a single wall polygon
#[test]
fn test_building_wall_polygon_structure() {
    let xml = encode(&building_model(), WriterConfig::default());
    let root = parse(&xml);

    assert_eq!(root.name, "CityModel");
    let building = root
        .path(&["core:cityObjectMember", "bldg:Building"])
        .expect("building member missing");
    assert_eq!(building.attribute("gml:id"), Some("building_1"));

    let pos_list = building
        .path(&[
            "bldg:lod2MultiSurface",
            "gml:MultiSurface",
            "gml:surfaceMember",
            "gml:Polygon",
            "gml:exterior",
            "gml:LinearRing",
            "gml:posList",
        ])
        .expect("posList path missing");

    assert_eq!(pos_list.attribute("srsDimension"), Some("3"));
    let tokens: Vec<f64> = pos_list
        .text
        .split_whitespace()
        .map(|t| t.parse().unwrap())
        .collect();
    assert_eq!(tokens.len(), 12);
    assert_eq!(&tokens[3..6], &[10.0, 0.0, 0.0]);
}

/// Pretty printing indents nested elements by the configured width
#[test]
fn test_pretty_print_indentation() {
    let xml = encode(&building_model(), WriterConfig::default().with_indent_size(4));
    assert!(xml.contains("\n    <core:cityObjectMember>"));
    assert!(xml.contains("\n        <bldg:Building gml:id=\"building_1\">"));

    let compact = encode(&building_model(), WriterConfig::default().with_pretty_print(false));
    assert!(!compact.contains('\n'));
    assert_eq!(parse(&xml), parse(&compact));
}

#[test]
fn test_appearances_disabled() {
    let mut model = building_model();
    let geometry = &mut model.city_objects[0].geometries[0];
    geometry.appearance.add_material(
        "rendering",
        true,
        Arc::new(MaterialTargetDefinition::new(
            "geom_1",
            Arc::new(Material::new("mat")),
        )),
    );
    geometry.polygons[0].appearance.add_texture(
        "rendering",
        true,
        Arc::new(TextureTargetDefinition::new(
            "geom_1_poly",
            Arc::new(Texture::new("tex", "wall.png")),
        )),
    );

    let with = encode(&model, WriterConfig::default());
    assert!(with.contains("<app:appearance>"));

    let without = encode(&model, WriterConfig::default().with_appearances(false));
    assert!(!without.contains("<app:appearance"));
    assert!(!without.contains("app:Material"));
}

#[test]
fn test_shared_material_deduplicated_per_theme() {
    let material = Arc::new(Material::new("roof_red"));
    let mut geometry = Geometry::new("roof", 2, GeometryType::Roof);
    for i in 0..2 {
        let mut polygon = single_polygon_geometry(&format!("roof_{}", i), 2, GeometryType::Roof)
            .polygons
            .remove(0);
        let target = polygon.id.clone();
        polygon.appearance.add_material(
            "rendering",
            true,
            Arc::new(MaterialTargetDefinition::new(target, Arc::clone(&material))),
        );
        geometry.polygons.push(polygon);
    }

    let mut roof = CityObject::new("roof_surface", CityObjectType::RoofSurface);
    roof.geometries.push(geometry);
    let mut building = CityObject::new("b", CityObjectType::Building);
    building.children.push(roof);
    let mut model = CityModel::new();
    model.city_objects.push(building);

    let root = parse(&encode(&model, WriterConfig::default()));
    let building = root
        .path(&["core:cityObjectMember", "bldg:Building"])
        .unwrap();
    let appearance = building
        .path(&["app:appearance", "app:Appearance"])
        .expect("appearance block on root object");
    assert_eq!(appearance.child("app:theme").unwrap().text, "rendering");

    let materials: Vec<_> = appearance
        .descendants()
        .into_iter()
        .filter(|e| e.name == "app:Material")
        .collect();
    assert_eq!(materials.len(), 1);

    // Only the root object carries an appearance block
    let roof = building
        .path(&["bldg:boundedBy", "bldg:RoofSurface"])
        .unwrap();
    assert!(roof.child("app:appearance").is_none());
    assert!(roof.child("bldg:lod2MultiSurface").is_some());
}

#[test]
fn test_texture_coordinates_written() {
    let mut model = building_model();
    let mut definition = TextureTargetDefinition::new(
        "geom_1_poly",
        Arc::new(Texture::new("facade", "textures/facade.jpg")),
    );
    definition.texture_coordinates.push(TextureCoordinates::new(
        "geom_1_ring",
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
    ));
    model.city_objects[0].geometries[0].polygons[0]
        .appearance
        .add_texture("summer", false, Arc::new(definition));

    let root = parse(&encode(&model, WriterConfig::default()));
    let texture = root
        .path(&[
            "core:cityObjectMember",
            "bldg:Building",
            "app:appearance",
            "app:Appearance",
            "app:surfaceDataMember",
            "app:ParameterizedTexture",
        ])
        .unwrap();
    assert_eq!(
        texture.child("app:imageURI").unwrap().text,
        "textures/facade.jpg"
    );
    assert_eq!(texture.child("app:wrapMode").unwrap().text, "none");

    let target = texture.child("app:target").unwrap();
    assert_eq!(target.attribute("uri"), Some("#geom_1_poly"));
    let coordinates = target
        .path(&["app:TexCoordList", "app:textureCoordinates"])
        .unwrap();
    assert_eq!(coordinates.attribute("ring"), Some("#geom_1_ring"));
    assert_eq!(coordinates.text, "0 0 1 0 1 1 0 1");
}

#[test]
fn test_namespace_minimality() {
    let mut model = CityModel::new();
    model
        .city_objects
        .push(CityObject::new("b", CityObjectType::Building));
    model
        .city_objects
        .push(CityObject::new("r", CityObjectType::Road));

    let root = parse(&encode(&model, WriterConfig::default()));
    let declared: Vec<&str> = root
        .attributes
        .iter()
        .filter(|(name, _)| name.starts_with("xmlns:"))
        .map(|(name, _)| &name["xmlns:".len()..])
        .collect();

    assert_eq!(
        declared,
        vec!["gml", "bldg", "core", "trans", "gen", "app", "xsi", "xlink"]
    );
    assert_eq!(
        root.attribute("xmlns"),
        Some("http://www.opengis.net/citygml/2.0")
    );

    let locations = root.attribute("xsi:schemaLocation").unwrap();
    assert!(locations.contains("building.xsd"));
    assert!(locations.contains("transportation.xsd"));
    assert!(!locations.contains("vegetation"));
    assert!(!locations.contains("waterBody"));
    assert!(!locations.contains("bridge"));
}

#[test]
fn test_encoding_is_idempotent() {
    let mut model = building_model();
    model.attributes.insert(
        "dataSource".to_string(),
        AttributeValue::from("survey 2023"),
    );

    let mut writer = CityGmlWriter::new(WriterConfig::default());
    writer.encode(&model).unwrap();
    let first = writer.render().unwrap();
    writer.encode(&model).unwrap();
    let second = writer.render().unwrap();
    assert_eq!(first, second);

    assert_eq!(first, encode(&model, WriterConfig::default()).into_bytes());
}

#[test]
fn test_nan_envelope_is_omitted() {
    let mut model = building_model();
    model.envelope = Envelope::new(Vec3::new(0.0, f64::NAN, 0.0), Vec3::new(1.0, 1.0, 1.0));
    let root = parse(&encode(&model, WriterConfig::default()));
    assert!(root.child("gml:boundedBy").is_none());
    assert!(
        !root
            .descendants()
            .iter()
            .any(|e| e.name == "gml:Envelope")
    );

    model.envelope = Envelope::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    let root = parse(&encode(&model, WriterConfig::default()));
    let envelope = root.path(&["gml:boundedBy", "gml:Envelope"]).unwrap();
    assert_eq!(envelope.child("gml:upperCorner").unwrap().text, "1 1 1");
}

#[test]
fn test_model_attributes_precede_envelope() {
    let mut model = building_model();
    model.envelope = Envelope::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    model
        .attributes
        .insert("name".to_string(), AttributeValue::from("Test district"));

    let root = parse(&encode(&model, WriterConfig::default()));
    let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["gml:name", "gml:boundedBy", "core:cityObjectMember"]
    );
}

#[test]
fn test_address_and_external_reference() {
    let mut model = building_model();
    let building = &mut model.city_objects[0];
    building.address = Some(Address {
        country: Some("Netherlands".to_string()),
        locality: Some("Delft".to_string()),
        thoroughfare_name: Some("Julianalaan".to_string()),
        thoroughfare_number: Some("134".to_string()),
        postal_code: Some("2628 BL".to_string()),
    });
    building.external_reference = Some(ExternalReference::new(
        "BAG",
        ExternalObject::Uri("http://bag.basisregistraties.overheid.nl/bag/id/pand/1".into()),
    ));

    let root = parse(&encode(&model, WriterConfig::default()));
    let building = root
        .path(&["core:cityObjectMember", "bldg:Building"])
        .unwrap();

    let locality = building
        .path(&[
            "bldg:address",
            "Address",
            "xalAddress",
            "xAL:AddressDetails",
            "xAL:Country",
            "xAL:Locality",
        ])
        .unwrap();
    assert_eq!(locality.attribute("Type"), Some("City"));
    assert_eq!(
        locality
            .path(&["xAL:Thoroughfare", "xAL:ThoroughfareNumber"])
            .unwrap()
            .text,
        "134"
    );
    assert_eq!(
        locality
            .path(&["xAL:PostalCode", "xAL:PostalCodeNumber"])
            .unwrap()
            .text,
        "2628 BL"
    );

    let reference = building.child("core:ExternalReference").unwrap();
    assert_eq!(
        reference.child("core:informationSystem").unwrap().text,
        "BAG"
    );
    assert!(
        reference
            .path(&["core:externalObject", "core:uri"])
            .unwrap()
            .text
            .ends_with("/pand/1")
    );

    let children: Vec<&str> = building.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        children,
        vec!["bldg:lod2MultiSurface", "bldg:address", "core:ExternalReference"]
    );
}

#[test]
fn test_xal_declared_only_with_addresses() {
    let xml = encode(&building_model(), WriterConfig::default());
    assert!(!xml.contains("xmlns:xAL"));

    let mut model = building_model();
    model.city_objects[0].address = Some(Address::new());
    let xml = encode(&model, WriterConfig::default());
    assert!(xml.contains("xmlns:xAL=\"urn:oasis:names:tc:ciq:xsdschema:xAL:2.0\""));
}

#[test]
fn test_generic_attributes() {
    let mut model = building_model();
    let building = &mut model.city_objects[0];
    building
        .attributes
        .insert("measuredHeight".to_string(), AttributeValue::Double(9.5));
    building
        .attributes
        .insert("energyClass".to_string(), AttributeValue::from("A+"));
    building
        .attributes
        .insert("storeysAboveGround".to_string(), AttributeValue::Integer(3));

    let root = parse(&encode(&model, WriterConfig::default()));
    let building = root
        .path(&["core:cityObjectMember", "bldg:Building"])
        .unwrap();
    assert_eq!(building.child("bldg:measuredHeight").unwrap().text, "9.5");
    assert_eq!(building.child("bldg:storeysAboveGround").unwrap().text, "3");
    let generic = building.child("gen:stringAttribute").unwrap();
    assert_eq!(generic.attribute("name"), Some("energyClass"));
    assert_eq!(generic.child("gen:value").unwrap().text, "A+");

    let root = parse(&encode(
        &model,
        WriterConfig::default().with_generic_attributes(false),
    ));
    let building = root
        .path(&["core:cityObjectMember", "bldg:Building"])
        .unwrap();
    assert!(building.child("gen:stringAttribute").is_none());
    assert!(building.child("bldg:measuredHeight").is_some());
}

#[test]
fn test_escaping_of_text_and_ids() {
    let mut model = CityModel::new();
    let mut object = CityObject::new("obj_1", CityObjectType::GenericCityObject);
    object
        .attributes
        .insert("note".to_string(), AttributeValue::from("a < b & c"));
    model.city_objects.push(object);

    let xml = encode(&model, WriterConfig::default());
    assert!(xml.contains("a &lt; b &amp; c"));

    let root = parse(&xml);
    let value = root
        .path(&[
            "core:cityObjectMember",
            "gen:GenericCityObject",
            "gen:stringAttribute",
            "gen:value",
        ])
        .unwrap();
    assert_eq!(value.text, "a < b & c");
}

#[test]
fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("city.gml");

    citygml::save(&building_model(), &path, &WriterConfig::default()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert_eq!(
        written,
        encode(&building_model(), WriterConfig::default())
    );

    // Only the target file remains in the directory
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_failed_save_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("city.gml");

    let mut writer = CityGmlWriter::new(WriterConfig::default());
    writer.encode(&building_model()).unwrap();
    let err = writer.save_to_file(&path).unwrap_err();

    assert!(err.to_string().contains("[E1001]"));
    assert_eq!(writer.last_error(), Some(err.to_string().as_str()));
    assert!(!path.exists());
}

#[test]
fn test_failed_encode_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("city.gml");
    std::fs::write(&path, "previous").unwrap();

    let config = WriterConfig::default().with_encoding("ISO-8859-1");
    assert!(citygml::save(&building_model(), &path, &config).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn test_model_helpers() {
    let model = building_model();
    let bytes = model.to_writer(Vec::new()).unwrap();
    let via_string = model.to_citygml_string(&WriterConfig::default()).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), via_string);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.gml");
    model.write_to_file(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), via_string);
}

#[test]
fn test_output_validation_enabled() {
    let config = WriterConfig::default().with_validation(true);
    let bytes = citygml::save_to_writer(&building_model(), Vec::new(), &config).unwrap();
    assert!(citygml::writer::check_well_formed(&bytes).is_ok());
}
