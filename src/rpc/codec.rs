use bytes::{Buf, BufMut};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::Status;

/// gRPC codec carrying CBOR instead of protobuf.
#[derive(Debug)]
pub struct CborCodec<T, U>(PhantomData<(fn(T), fn() -> U)>);

impl<T, U> Default for CborCodec<T, U> {
    fn default() -> Self {
        CborCodec(PhantomData)
    }
}

impl<T, U> Codec for CborCodec<T, U>
where
    T: Serialize + Send + 'static,
    U: DeserializeOwned + Send + 'static,
{
    type Encode = T;
    type Decode = U;
    type Encoder = CborEncoder<T>;
    type Decoder = CborDecoder<U>;

    fn encoder(&mut self) -> Self::Encoder {
        CborEncoder(PhantomData)
    }

    fn decoder(&mut self) -> Self::Decoder {
        CborDecoder(PhantomData)
    }
}

#[derive(Debug)]
pub struct CborEncoder<T>(PhantomData<fn(T)>);

impl<T: Serialize> Encoder for CborEncoder<T> {
    type Item = T;
    type Error = Status;

    fn encode(&mut self, item: T, dst: &mut EncodeBuf<'_>) -> Result<(), Status> {
        let encoded = encode_cbor(&item)?;
        dst.put_slice(&encoded);
        Ok(())
    }
}

#[derive(Debug)]
pub struct CborDecoder<U>(PhantomData<fn() -> U>);

impl<U: DeserializeOwned> Decoder for CborDecoder<U> {
    type Item = U;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<U>, Status> {
        // the whole frame is one message, consume it all
        let frame = src.copy_to_bytes(src.remaining());
        decode_cbor(&frame).map(Some)
    }
}

pub fn encode_cbor<T: Serialize>(item: &T) -> Result<Vec<u8>, Status> {
    let mut encoded = Vec::new();
    ciborium::ser::into_writer(item, &mut encoded)
        .map_err(|err| Status::internal(format!("failed to encode CBOR request: {}", err)))?;
    Ok(encoded)
}

pub fn decode_cbor<U: DeserializeOwned>(frame: &[u8]) -> Result<U, Status> {
    ciborium::de::from_reader(frame)
        .map_err(|err| Status::internal(format!("failed to decode CBOR response: {}", err)))
}
