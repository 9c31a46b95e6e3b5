//! xAL address encoding

use super::builder::DocumentBuilder;
use super::namespace::Namespace;
use crate::error::Result;
use crate::model::Address;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Write `Address/xalAddress/xAL:AddressDetails` for an address
///
/// Locality is only reachable under a country, and thoroughfare and postal
/// code only under a locality.
pub fn write_address(builder: &mut DocumentBuilder, address: &Address) -> Result<()> {
    builder.start_element("Address", Namespace::CityGml)?;
    builder.start_element("xalAddress", Namespace::CityGml)?;
    builder.start_element("AddressDetails", Namespace::Xal)?;

    if let Some(country) = non_empty(&address.country) {
        builder.start_element("Country", Namespace::Xal)?;
        builder.write_text_element("CountryName", Namespace::Xal, country)?;

        if let Some(locality) = non_empty(&address.locality) {
            write_locality(builder, address, locality)?;
        }

        builder.end_element()?;
    }

    builder.end_element()?;
    builder.end_element()?;
    builder.end_element()
}

fn write_locality(builder: &mut DocumentBuilder, address: &Address, locality: &str) -> Result<()> {
    builder.start_element("Locality", Namespace::Xal)?;
    builder.write_attribute("Type", "City")?;
    builder.write_text_element("LocalityName", Namespace::Xal, locality)?;

    let number = non_empty(&address.thoroughfare_number);
    let name = non_empty(&address.thoroughfare_name);
    if number.is_some() || name.is_some() {
        builder.start_element("Thoroughfare", Namespace::Xal)?;
        builder.write_attribute("Type", "Street")?;
        if let Some(number) = number {
            builder.write_text_element("ThoroughfareNumber", Namespace::Xal, number)?;
        }
        if let Some(name) = name {
            builder.write_text_element("ThoroughfareName", Namespace::Xal, name)?;
        }
        builder.end_element()?;
    }

    if let Some(postal_code) = non_empty(&address.postal_code) {
        builder.start_element("PostalCode", Namespace::Xal)?;
        builder.write_text_element("PostalCodeNumber", Namespace::Xal, postal_code)?;
        builder.end_element()?;
    }

    builder.end_element()
}
