//! Facility Map Component
//!
//! Interactive world map of company facilities, rendered with Leaflet. The
//! map surface is created once per mount and mutated in place on every data
//! change: the marker group is cleared and redrawn from the incoming facility
//! list, then the viewport is fitted to the data extent. The surface is
//! destroyed on unmount.

use leptos::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::components::leaflet;
use crate::state::global::{Facility, FALLBACK_COLOR};

/// Starting view: a neutral global point at low zoom.
const DEFAULT_CENTER: (f64, f64) = (20.0, 0.0);
const DEFAULT_ZOOM: f64 = 2.0;
const MIN_ZOOM: f64 = 2.0;
const MAX_ZOOM: f64 = 18.0;

/// Fit-to-bounds padding and zoom cap. The cap keeps a single facility (or a
/// colocated cluster) from filling the screen with one city block.
const FIT_PADDING: f64 = 50.0;
const MAX_FIT_ZOOM: f64 = 5.0;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Interactive facility map.
///
/// Each change to `facilities` or `company_colors` replaces every marker;
/// the map's own pan/zoom/tile state survives the redraw. An empty facility
/// list leaves the viewport untouched so transient empty states (mid-filter
/// changes) don't snap the view back to the origin.
#[component]
pub fn FacilityMap(
    #[prop(into)] facilities: Signal<Vec<Facility>>,
    #[prop(into)] company_colors: Signal<HashMap<String, String>>,
) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();

    let map_handle: Rc<RefCell<Option<leaflet::Map>>> = Rc::new(RefCell::new(None));
    let marker_group: Rc<RefCell<Option<leaflet::LayerGroup>>> = Rc::new(RefCell::new(None));

    {
        let map_handle = Rc::clone(&map_handle);
        let marker_group = Rc::clone(&marker_group);

        create_effect(move |_| {
            let facilities = facilities.get();
            let colors = company_colors.get();

            // The effect can fire before the node is attached.
            let Some(container) = container_ref.get() else {
                return;
            };

            if map_handle.borrow().is_none() {
                let element: &web_sys::HtmlElement = &container;
                let map = leaflet::new_map(
                    element,
                    &leaflet::map_options(DEFAULT_CENTER, DEFAULT_ZOOM, MIN_ZOOM, MAX_ZOOM),
                );
                leaflet::new_tile_layer(TILE_URL, &leaflet::tile_options(TILE_ATTRIBUTION))
                    .add_to(&map);

                let group = leaflet::new_layer_group();
                group.add_to(&map);

                *marker_group.borrow_mut() = Some(group);
                *map_handle.borrow_mut() = Some(map);
            }

            let map_ref = map_handle.borrow();
            let group_ref = marker_group.borrow();
            if let (Some(map), Some(group)) = (map_ref.as_ref(), group_ref.as_ref()) {
                redraw_markers(map, group, &facilities, &colors);
            }
        });
    }

    // Unconditional teardown: destroy the surface and drop the handle so a
    // remount starts from a fresh instance.
    on_cleanup(move || {
        marker_group.borrow_mut().take();
        if let Some(map) = map_handle.borrow_mut().take() {
            map.remove();
        }
    });

    view! {
        <div node_ref=container_ref class="h-[500px] w-full rounded-xl z-0" />
    }
}

/// Clear the marker group and redraw it from `facilities`, then fit the
/// viewport to the data extent (non-empty lists only).
fn redraw_markers(
    map: &leaflet::Map,
    group: &leaflet::LayerGroup,
    facilities: &[Facility],
    colors: &HashMap<String, String>,
) {
    group.clear_layers();

    for facility in facilities {
        let color = resolve_color(colors, &facility.company);
        let size = icon_size(facility.is_headquarters);

        let icon = leaflet::new_div_icon(&leaflet::div_icon_options(
            &marker_icon_svg(color, facility.is_headquarters),
            size,
        ));
        let marker = leaflet::new_marker(
            &leaflet::lat_lng(facility.lat, facility.lng),
            &leaflet::marker_options(&icon),
        );
        marker.bind_popup(&popup_html(facility, color));

        group.add_layer(&marker);
    }

    if let Some(bounds) = facility_bounds(facilities) {
        let corners = js_sys::Array::of2(
            &leaflet::lat_lng(bounds.0 .0, bounds.0 .1),
            &leaflet::lat_lng(bounds.1 .0, bounds.1 .1),
        );
        map.fit_bounds(&corners, &leaflet::fit_bounds_options(FIT_PADDING, MAX_FIT_ZOOM));
    }
}

/// Display color for a company, falling back to neutral gray when the
/// company has no assigned color.
fn resolve_color<'a>(colors: &'a HashMap<String, String>, company: &str) -> &'a str {
    colors.get(company).map(String::as_str).unwrap_or(FALLBACK_COLOR)
}

/// Rendered icon edge length in CSS pixels. Headquarters markers are
/// strictly larger.
fn icon_size(is_headquarters: bool) -> f64 {
    if is_headquarters {
        32.0
    } else {
        24.0
    }
}

/// Marker icon: a company-colored circle with a white stroke for contrast
/// against arbitrary tile backgrounds. Headquarters add an inner white dot.
fn marker_icon_svg(color: &str, is_headquarters: bool) -> String {
    let size = icon_size(is_headquarters);
    let half = size / 2.0;
    let inner_dot = if is_headquarters {
        format!(
            "<circle cx=\"{half}\" cy=\"{half}\" r=\"{r}\" fill=\"white\"/>",
            half = half,
            r = half / 3.0,
        )
    } else {
        String::new()
    };

    format!(
        "<svg width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" \
         xmlns=\"http://www.w3.org/2000/svg\">\
         <circle cx=\"{half}\" cy=\"{half}\" r=\"{r}\" fill=\"{color}\" \
         stroke=\"white\" stroke-width=\"2\"/>{inner_dot}</svg>",
        size = size,
        half = half,
        r = half - 2.0,
        color = color,
        inner_dot = inner_dot,
    )
}

/// Popup content: initial-letter badge, company, facility type, location,
/// and a company-colored "Headquarters" badge where it applies. Company and
/// location strings come from the backend's curated facility table and are
/// interpolated as-is.
fn popup_html(facility: &Facility, color: &str) -> String {
    let initial = facility.company.chars().next().unwrap_or('?');

    let hq_badge = if facility.is_headquarters {
        format!(
            "<div style=\"margin-top: 8px;\">\
             <span style=\"background: {color}20; color: {color}; padding: 2px 8px; \
             border-radius: 4px; font-size: 11px; font-weight: 500;\">Headquarters</span>\
             </div>",
            color = color,
        )
    } else {
        String::new()
    };

    format!(
        "<div style=\"min-width: 180px; font-family: system-ui, sans-serif;\">\
         <div style=\"display: flex; align-items: center; gap: 8px; margin-bottom: 8px;\">\
         <div style=\"width: 24px; height: 24px; border-radius: 6px; background: {color}; \
         display: flex; align-items: center; justify-content: center; color: white; \
         font-weight: bold; font-size: 12px;\">{initial}</div>\
         <div><div style=\"font-weight: 600; color: #1e293b;\">{company}</div>\
         <div style=\"font-size: 12px; color: #64748b;\">{kind}</div></div></div>\
         <div style=\"border-top: 1px solid #e2e8f0; padding-top: 8px;\">\
         <div style=\"font-weight: 500; color: #1e293b;\">{city}</div>\
         <div style=\"font-size: 12px; color: #64748b;\">{country}</div></div>{hq_badge}</div>",
        color = color,
        initial = initial,
        company = facility.company,
        kind = facility.kind,
        city = facility.city,
        country = facility.country,
        hq_badge = hq_badge,
    )
}

/// Minimal bounding box covering every facility, as ((south, west),
/// (north, east)). `None` for an empty list, which leaves the viewport
/// unchanged.
fn facility_bounds(facilities: &[Facility]) -> Option<((f64, f64), (f64, f64))> {
    let first = facilities.first()?;

    let mut south = first.lat;
    let mut north = first.lat;
    let mut west = first.lng;
    let mut east = first.lng;

    for facility in &facilities[1..] {
        south = south.min(facility.lat);
        north = north.max(facility.lat);
        west = west.min(facility.lng);
        east = east.max(facility.lng);
    }

    Some(((south, west), (north, east)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(company: &str, lat: f64, lng: f64, is_headquarters: bool) -> Facility {
        Facility {
            company: company.to_string(),
            city: "Austin".to_string(),
            country: "USA".to_string(),
            lat,
            lng,
            kind: "Manufacturing".to_string(),
            is_headquarters,
        }
    }

    #[test]
    fn unknown_company_falls_back_to_gray() {
        let mut colors = HashMap::new();
        colors.insert("Flex".to_string(), "#00A0E3".to_string());

        assert_eq!(resolve_color(&colors, "Flex"), "#00A0E3");
        assert_eq!(resolve_color(&colors, "Unknown Corp"), FALLBACK_COLOR);
    }

    #[test]
    fn headquarters_icon_is_strictly_larger() {
        assert!(icon_size(true) > icon_size(false));
    }

    #[test]
    fn headquarters_icon_carries_inner_dot() {
        let hq = marker_icon_svg("#00A0E3", true);
        let plant = marker_icon_svg("#00A0E3", false);

        assert_eq!(hq.matches("<circle").count(), 2);
        assert_eq!(plant.matches("<circle").count(), 1);
    }

    #[test]
    fn both_icon_variants_have_white_stroke() {
        for is_hq in [true, false] {
            let svg = marker_icon_svg("#C41E3A", is_hq);
            assert!(svg.contains("stroke=\"white\""));
        }
    }

    #[test]
    fn popup_badge_only_for_headquarters() {
        let hq = facility("Flex", 1.29, 103.8, true);
        let plant = facility("Flex", 1.29, 103.8, false);

        assert!(popup_html(&hq, "#00A0E3").contains("Headquarters"));
        assert!(!popup_html(&plant, "#00A0E3").contains("Headquarters"));
    }

    #[test]
    fn popup_shows_company_details() {
        let f = facility("Jabil", 27.77, -82.64, false);
        let html = popup_html(&f, "#1E4D2B");

        assert!(html.contains("Jabil"));
        assert!(html.contains("Manufacturing"));
        assert!(html.contains("Austin"));
        assert!(html.contains("USA"));
        // Initial-letter badge
        assert!(html.contains(">J</div>"));
    }

    #[test]
    fn bounds_cover_all_facilities() {
        let facilities = vec![
            facility("Flex", 0.0, 0.0, false),
            facility("Jabil", 10.0, 10.0, false),
            facility("Sanmina", -5.0, 3.0, false),
        ];

        let ((south, west), (north, east)) =
            facility_bounds(&facilities).expect("bounds for non-empty list");

        assert_eq!(south, -5.0);
        assert_eq!(west, 0.0);
        assert_eq!(north, 10.0);
        assert_eq!(east, 10.0);
    }

    #[test]
    fn empty_list_yields_no_bounds() {
        // No bounds means the redraw skips fit-to-bounds and the viewport
        // stays where the user left it.
        assert_eq!(facility_bounds(&[]), None);
    }

    #[test]
    fn single_facility_bounds_degenerate_to_point() {
        let facilities = vec![facility("Celestica", 43.65, -79.38, true)];
        let (sw, ne) = facility_bounds(&facilities).expect("bounds");
        assert_eq!(sw, ne);
    }
}
