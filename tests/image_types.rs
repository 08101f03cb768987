use rukuli::{ImageBuffer, ImageView, RukuliError};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        RukuliError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        RukuliError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        RukuliError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, RukuliError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.as_slice(), data.as_slice());

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0), Some(5u8));
    assert!(roi.get(2, 0).is_none());

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        RukuliError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn roi_to_owned_is_contiguous() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();

    let owned = view.roi(2, 0, 2, 3).unwrap().to_buffer().unwrap();
    assert_eq!(owned.width(), 2);
    assert_eq!(owned.height(), 3);
    assert_eq!(owned.as_slice(), &[2u8, 3, 6, 7, 10, 11]);
}

#[test]
fn image_buffer_requires_exact_length() {
    let err = ImageBuffer::new(vec![0u8; 5], 2, 2).err().unwrap();
    assert_eq!(
        err,
        RukuliError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );

    let err = ImageBuffer::new(vec![0u8; 3], 2, 2).err().unwrap();
    assert_eq!(err, RukuliError::BufferTooSmall { needed: 4, got: 3 });

    let buf = ImageBuffer::new(vec![7u8; 6], 3, 2).unwrap();
    assert_eq!(buf.view().get(2, 1), Some(7u8));
    assert!(buf.view().get(3, 1).is_none());
}
