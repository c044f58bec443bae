#[cfg(test)]
mod tests {
    use crate::cluster::{Cluster, Point, cluster_by_circle_union};
    use crate::export::{
        conditions_summary, wkt_polygon, write_clusters, write_geojson, write_tree_points,
    };
    use crate::geometry::cluster_polygon;
    use crate::loader::read_trees_from;
    use crate::tree::{Condition, TreeObservation};
    use serde_json::Value;

    #[test]
    fn test_wkt_polygon_is_closed() {
        let ring = vec![
            Point::from_lat_lng(35.0, 139.0),
            Point::from_lat_lng(35.0, 139.5),
            Point::from_lat_lng(35.5, 139.5),
        ];
        assert_eq!(
            wkt_polygon(&ring),
            "POLYGON((139 35,139.5 35,139.5 35.5,139 35))"
        );
        assert_eq!(wkt_polygon(&[]), "POLYGON EMPTY");
    }

    #[test]
    fn test_conditions_summary() {
        let trees = vec![
            TreeObservation::new("A", 2024, 35.0, 139.0, Condition::Dead),
            TreeObservation::new("B", 2024, 35.0, 139.0, Condition::PestDamage),
            TreeObservation::new("C", 2024, 35.0, 139.0, Condition::Dead),
        ];
        let cluster = Cluster::new(0, trees.iter().collect());
        assert_eq!(conditions_summary(&cluster), "PestDamage:1;Dead:2");
    }

    #[test]
    fn test_write_clusters() {
        let trees = vec![
            TreeObservation::new("T1", 2024, 35.0000, 139.0000, Condition::Dead),
            TreeObservation::new("T2", 2024, 35.0001, 139.0000, Condition::PestDamage),
            TreeObservation::new("T3", 2024, 35.0100, 139.0000, Condition::PestDamage),
        ];
        let clusters = cluster_by_circle_union(&trees, 25.0, 0.3);

        let mut out = Vec::new();
        write_clusters(&mut out, &clusters, 2024).expect("write failed");
        let text = String::from_utf8(out).expect("utf8");

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().expect("headers").clone();
        assert_eq!(headers.len(), 12);
        assert_eq!(&headers[0], "cluster_id");
        assert_eq!(&headers[11], "wkt_geometry");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "cluster-0");
        assert_eq!(&rows[0][1], "2");
        assert_eq!(&rows[0][2], "2024");
        assert_eq!(&rows[0][9], "Severe");
        assert_eq!(&rows[0][10], "PestDamage:1;Dead:1");
        assert!(rows[0][11].starts_with("POLYGON(("));
        assert_eq!(&rows[1][9], "Moderate");
        assert_eq!(&rows[1][3], "35.01");
    }

    #[test]
    fn test_write_no_clusters() {
        let mut out = Vec::new();
        write_clusters(&mut out, &[], 2024).expect("write failed");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 1);
    }

    fn survey() -> Vec<TreeObservation> {
        let mut healthy = TreeObservation::new("T0", 2024, 35.005, 139.0, Condition::Healthy);
        healthy.species = "コナラ".to_string();
        healthy.number = 7;
        healthy.notes = "north, slope".to_string();
        vec![
            healthy,
            TreeObservation::new("T1", 2024, 35.0000, 139.0000, Condition::Dead),
            TreeObservation::new("T2", 2024, 35.0001, 139.0000, Condition::PestDamage),
            TreeObservation::new("T3", 2024, 35.0100, 139.0010, Condition::PestDamage),
        ]
    }

    #[test]
    fn test_write_geojson() {
        let trees = survey();
        let clusters = cluster_by_circle_union(&trees, 25.0, 0.3);
        assert_eq!(clusters.len(), 2);

        let mut out = Vec::new();
        write_geojson(&mut out, &trees, &clusters, 2024).expect("write failed");
        let doc: Value = serde_json::from_slice(&out).expect("invalid json");

        assert_eq!(doc["type"], "FeatureCollection");
        assert_eq!(doc["crs"]["properties"]["name"], "urn:ogc:def:crs:OGC:1.3:CRS84");

        let features = doc["features"].as_array().expect("features");
        assert_eq!(features.len(), 6);

        // trees first, as points in [lng, lat] order
        let tree = &features[0];
        assert_eq!(tree["geometry"]["type"], "Point");
        assert_eq!(tree["geometry"]["coordinates"][0], 139.0);
        assert_eq!(tree["geometry"]["coordinates"][1], 35.005);
        assert_eq!(tree["properties"]["treeId"], "T0");
        assert_eq!(tree["properties"]["number"], 7);
        assert_eq!(tree["properties"]["species"], "コナラ");
        assert_eq!(tree["properties"]["condition"], "Healthy");
        assert_eq!(tree["properties"]["notes"], "north, slope");

        let zone = &features[4];
        assert_eq!(zone["properties"]["clusterId"], "cluster-0");
        assert_eq!(zone["properties"]["treeCount"], 2);
        assert_eq!(zone["properties"]["year"], 2024);
        let center_lat = zone["properties"]["centerLat"].as_f64().expect("centerLat");
        assert!((center_lat - clusters[0].center().lat()).abs() < 1e-12);
        assert_eq!(zone["properties"]["conditions"]["PestDamage"], 1);
        assert_eq!(zone["properties"]["conditions"]["Dead"], 1);
        assert!(zone["properties"]["conditions"].get("Healthy").is_none());

        // outline ring is the cluster polygon, closed
        assert_eq!(zone["geometry"]["type"], "Polygon");
        let ring = zone["geometry"]["coordinates"][0].as_array().expect("ring");
        let polygon = cluster_polygon(&clusters[0]);
        assert_eq!(ring.len(), polygon.len() + 1);
        assert_eq!(ring[0], ring[ring.len() - 1]);
        let lng = ring[0][0].as_f64().expect("lng");
        let lat = ring[0][1].as_f64().expect("lat");
        assert!((lng - polygon[0].lng()).abs() < 1e-12);
        assert!((lat - polygon[0].lat()).abs() < 1e-12);

        let meta = &doc["metadata"];
        assert_eq!(meta["year"], 2024);
        assert_eq!(meta["totalTrees"], 4);
        assert_eq!(meta["totalClusters"], 2);
        assert_eq!(meta["clusteredTrees"], 3);
        assert_eq!(meta["bounds"]["north"], 35.01);
        assert_eq!(meta["bounds"]["east"], 139.001);
    }

    #[test]
    fn test_write_geojson_empty() {
        let mut out = Vec::new();
        write_geojson(&mut out, &[], &[], 2024).expect("write failed");
        let doc: Value = serde_json::from_slice(&out).expect("invalid json");
        assert_eq!(doc["features"].as_array().map(Vec::len), Some(0));
        assert!(doc["metadata"]["bounds"].is_null());
    }

    #[test]
    fn test_write_tree_points() {
        let trees = survey();
        let mut out = Vec::new();
        write_tree_points(&mut out, &trees).expect("write failed");

        let text = String::from_utf8(out).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(concat!(
                "tree_id,number,year,species,location,",
                "circumference,height,condition,notes,longitude,latitude"
            ))
        );
        assert_eq!(
            lines.next(),
            Some("T0,7,2024,コナラ,,0,0,Healthy,\"north, slope\",139,35.005")
        );

        // the table loads back as the same observations
        let reloaded = read_trees_from(text.as_bytes()).expect("reload failed");
        assert_eq!(reloaded, trees);
    }
}
