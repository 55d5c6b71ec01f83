//! Type marker classification tests.

use jsonbin::{get_first_value_offset, ContainerShape, LengthWidth, MarkerKind, NodeType, TypeMarker};

#[test]
fn test_unassigned_markers() {
    let invalid: Vec<u8> = (0..=255u8).filter(|b| !TypeMarker(*b).is_valid()).collect();

    let mut expected: Vec<u8> = (0x68..=0x74).collect();
    expected.push(0xC7);
    expected.push(0xCF);
    expected.extend(0xD4..=0xD7);
    expected.extend(0xF0..=0xFF);
    assert_eq!(invalid, expected);

    for marker in invalid {
        assert!(NodeType::try_from(marker).is_err());
    }
}

#[test]
fn test_node_types() {
    fn assert_node_type(marker: u8, expected: NodeType) {
        assert_eq!(NodeType::try_from(marker).unwrap(), expected, "marker {:#04x}", marker);
    }

    assert_node_type(0x00, NodeType::Number);
    assert_node_type(0x1F, NodeType::Number);
    assert_node_type(TypeMarker::NUMBER_DOUBLE, NodeType::Number);
    assert_node_type(0x20, NodeType::String);
    assert_node_type(0x60, NodeType::String);
    assert_node_type(TypeMarker::UPPERCASE_GUID_STRING, NodeType::String);
    assert_node_type(TypeMarker::PACKED_7_BIT_STRING_LENGTH_2, NodeType::String);
    assert_node_type(0x80, NodeType::String);
    assert_node_type(TypeMarker::STR_R4, NodeType::String);
    assert_node_type(TypeMarker::FLOAT32, NodeType::Float32);
    assert_node_type(TypeMarker::NULL, NodeType::Null);
    assert_node_type(TypeMarker::FALSE, NodeType::False);
    assert_node_type(TypeMarker::TRUE, NodeType::True);
    assert_node_type(TypeMarker::GUID, NodeType::Guid);
    assert_node_type(TypeMarker::UINT32, NodeType::UInt32);
    assert_node_type(TypeMarker::BINARY_2_BYTE_LENGTH, NodeType::Binary);
    assert_node_type(TypeMarker::ARR_LC4, NodeType::Array);
    assert_node_type(TypeMarker::OBJ0, NodeType::Object);

    assert_eq!(NodeType::UInt32.to_string(), "uint32");
}

#[test]
fn test_predicates() {
    assert!(TypeMarker(0x05).is_encoded_number_literal());
    assert!(TypeMarker(0x05).is_number());
    assert!(!TypeMarker(0x05).is_string());
    assert!(TypeMarker(0x41).is_user_string());
    assert!(TypeMarker(0x41).is_encoded_string());
    assert!(TypeMarker(0x3F).is_system_string());
    assert!(!TypeMarker(0x3F).is_user_string());
    assert!(TypeMarker(TypeMarker::STR_R3).is_reference_string());
    assert!(TypeMarker(TypeMarker::STR_L2).is_variable_length_string());
    assert!(TypeMarker(TypeMarker::ARR1).is_container());
    assert!(TypeMarker(TypeMarker::OBJ_L4).is_object());
    assert!(!TypeMarker(TypeMarker::OBJ_L4).is_array());
    assert!(TypeMarker(TypeMarker::TRUE).is_boolean());
}

#[test]
fn test_container_kinds() {
    assert_eq!(
        MarkerKind::of(TypeMarker::ARR_LC1),
        MarkerKind::Array(ContainerShape::LengthAndCount(LengthWidth::One))
    );
    assert_eq!(MarkerKind::of(TypeMarker::OBJ1), MarkerKind::Object(ContainerShape::Single));
    assert_eq!(MarkerKind::of(TypeMarker::NULL).container_shape(), None);
}

#[test]
fn test_first_value_offsets() {
    let expected = [1, 1, 2, 3, 5, 3, 5, 9];
    for (i, offset) in expected.iter().enumerate() {
        assert_eq!(get_first_value_offset(TypeMarker::ARR0 + i as u8), *offset);
        assert_eq!(get_first_value_offset(TypeMarker::OBJ0 + i as u8), *offset);
    }
    assert_eq!(get_first_value_offset(TypeMarker::NULL), 0);
    assert_eq!(get_first_value_offset(0x85), 0);
}
