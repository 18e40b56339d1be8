/// Display label for a property type tag, as shown on the dashboard charts.
///
/// Unknown tags are returned unchanged.
pub fn property_type_label(tag: &str) -> &str {
    match tag {
        "house" => "House",
        "apartment" => "Apartment",
        "land" => "Land",
        "duplex" => "Duplex",
        "office-space" => "Office Space",
        "shop" => "Shop",
        "warehouse" => "Warehouse",
        "industrial-property" => "Industrial",
        "restaurant" => "Restaurant",
        "hotel" => "Hotel",
        "parking-space" => "Parking",
        "farm" => "Farm",
        other => other,
    }
}
